use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};

use super::super::{args::ExtractArgs, exit_status::ExitStatus, report};
use crate::{
    core::ExtractContext,
    po_writer::{compile, write_catalog},
};

pub fn extract(args: &ExtractArgs) -> Result<ExitStatus> {
    let ctx = ExtractContext::new(args)?;
    let output = ctx.extract()?;

    if args.stdout {
        io::stdout()
            .lock()
            .write_all(compile(&output.catalog).as_bytes())
            .context("Failed to write catalog to stdout")?;
        // Keep stdout clean for piping
        report::print_summary_to(&output, None, &mut io::stderr().lock());
    } else {
        write_catalog(Path::new(&output.file_name), &output.catalog)?;
        report::print_summary(&output, Some(&output.file_name));
    }

    report::print_parse_warning(output.parse_errors.len(), args.verbose);

    Ok(ExitStatus::Success)
}
