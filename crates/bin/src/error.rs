use std::{io, path::PathBuf};

#[cfg(feature = "fancy-errors")]
use miette::{set_hook, MietteHandlerOpts};
use miette::{Diagnostic, InstallError, Result};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub(crate) enum Error {
    #[error("I was not able to read the map file `{}`.", .0.display())]
    #[diagnostic(code(E101), help("Check that the path exists and holds UTF-8 text."))]
    ReadMapFile(PathBuf, #[source] io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] seam_map::Error),
}

impl Error {
    pub(crate) fn install_and_configure() -> Result<(), InstallError> {
        #[cfg(feature = "fancy-errors")]
        set_hook(Box::new(|_| {
            Box::new(
                MietteHandlerOpts::new().with_cause_chain().width(85).terminal_links(false).build(),
            )
        }))?;

        Ok(())
    }
}
