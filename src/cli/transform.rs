//! The `encrypt` and `decrypt` subcommands.
//!
//! Both run the same flow with opposite directions: validate the input
//! selection, resolve configuration, then route the text or file through the
//! transform pipeline. Input validation happens before configuration and
//! client setup, so a bad invocation never reaches the network.

use tracing::debug;

use crate::cli::{output, TransitArgs};
use crate::core::client::TransitClient;
use crate::core::config::{ConfigSources, TransitConfig};
use crate::core::types::{Direction, EmptyUnits};
use crate::core::{file_ops, pipeline};
use crate::error::{InputError, Result};

pub fn execute(direction: Direction, args: TransitArgs) -> Result<()> {
    if args.text.is_some() && args.file.is_some() {
        return Err(InputError::BothSources.into());
    }
    if args.text.is_none() && args.file.is_none() {
        return Err(InputError::NoSource.into());
    }

    let config = TransitConfig::resolve(ConfigSources {
        addr: args.vault_addr,
        token: args.vault_token,
        engine_path: args.engine_path,
        key: args.key,
        batch_limit: args.batch_limit,
    })?;
    let batch_limit = config.batch_limit;

    let client = TransitClient::new(config)?;

    let empty_units = if args.preserve_empty {
        EmptyUnits::Preserve
    } else {
        EmptyUnits::Drop
    };

    if let Some(text) = args.text {
        debug!(%direction, "transforming text input");
        let result = pipeline::transform_unit(&client, direction, &text)?;
        println!("{result}");
        return Ok(());
    }

    // The selectors were validated above, so a file is the only other source.
    if let Some(file) = args.file {
        debug!(%direction, path = %file.display(), "transforming file input");
        let destination = file_ops::transform_file(
            &client,
            direction,
            &file,
            args.output.as_deref(),
            args.override_file,
            batch_limit,
            empty_units,
        )?;

        let verb = match direction {
            Direction::Encrypt => "encrypted",
            Direction::Decrypt => "decrypted",
        };
        output::success(&format!(
            "file {verb}: {}",
            output::path(&destination.display().to_string())
        ));
    }

    Ok(())
}
