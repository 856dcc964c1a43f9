use std::process::ExitCode;

use log::{error, info};

use postbuild::prelude::*;

fn main() -> ExitCode {
    human_panic::setup_panic!();

    let argument_matches = get_matches();

    if let Err(e) = init_logger(
        get_verbosity(&argument_matches),
        &get_log_file(&argument_matches),
    ) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match perform_processing_based_on_configuration(&argument_matches) {
        Ok(report) => {
            info!("{report}");
            info!("{COMPLETE_MESSAGE}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{ERROR_PREFIX}: {e:#}");
            ExitCode::FAILURE
        }
    }
}
