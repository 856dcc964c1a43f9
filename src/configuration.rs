use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::ArgMatches;
use log::debug;

use crate::config::{CollisionPolicy, Config, load_config};
use crate::pipeline::{RunReport, run};

/// Loads the configuration and runs the pipeline as the arguments ask
pub fn perform_processing_based_on_configuration(argument_matches: &ArgMatches) -> Result<RunReport> {
    let configuration = configuration_from_matches(argument_matches)?;
    debug!("Effective configuration: {configuration:?}");

    let report = run(configuration, argument_matches.get_flag("dry"))?;

    Ok(report)
}

/// Builds the effective configuration from the config file and CLI overrides
///
/// Without `--config` the defaults are used. Command-line values replace
/// the corresponding file values.
pub fn configuration_from_matches(argument_matches: &ArgMatches) -> Result<Config> {
    let mut configuration = match argument_matches.get_one::<PathBuf>("config") {
        Some(file) => load_config(file)?,
        None => Config::default(),
    };

    if let Some(root) = argument_matches.get_one::<PathBuf>("root") {
        configuration.root = root.clone();
    }

    if let Some(policy) = argument_matches.get_one::<String>("on_collision") {
        configuration.on_collision = CollisionPolicy::from_str(policy).map_err(|e| anyhow!(e))?;
    }

    if argument_matches.get_flag("always_write") {
        configuration.rewrite.always_write = true;
    }

    if argument_matches.get_flag("parallel") {
        configuration.rewrite.parallel = true;
    }

    if let Some(skipped) = argument_matches.get_many::<String>("skip") {
        for pass in skipped {
            configuration.passes.disable(pass)?;
        }
    }

    configuration.validate()?;

    Ok(configuration)
}
