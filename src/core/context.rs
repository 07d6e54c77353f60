use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::{
    cli::args::ExtractArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        catalog::Catalog,
        extract::extract_file,
        file_scanner::scan_files,
        parsers::jsx::{ParsedSource, parse_source},
        session::{ExtractionSession, SessionStats},
    },
    issues::ParseErrorIssue,
};

/// Everything one `potgen extract` run produced.
pub struct ExtractOutput {
    /// Target file name the catalog belongs to.
    pub file_name: String,
    pub catalog: Catalog,
    pub stats: SessionStats,
    /// Source files that were scanned.
    pub files_scanned: usize,
    /// Source files with at least one translation call.
    pub files_with_calls: usize,
    pub parse_errors: Vec<ParseErrorIssue>,
}

/// Extraction pipeline state: merged configuration and the files to visit.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--output messages.pot`)
/// 2. `.potgenrc.json` config file
/// 3. Built-in defaults
pub struct ExtractContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Absolute directory that was scanned.
    pub source_root: PathBuf,

    /// Source files to extract from, in path order.
    pub files: BTreeSet<String>,

    pub verbose: bool,
}

impl ExtractContext {
    /// Load configuration, apply CLI overrides and scan the source root.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the source root does
    /// not exist.
    pub fn new(args: &ExtractArgs) -> Result<Self> {
        let verbose = args.verbose;

        // The config is searched from the CLI source root, or the working directory
        let search_dir = args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&search_dir)?;
        if verbose {
            match &config_result.path {
                Some(path) => eprintln!("{} Using {}", "note:".bold(), path.display()),
                None => eprintln!(
                    "{} No {} found, using default configuration",
                    "note:".bold(),
                    CONFIG_FILE_NAME
                ),
            }
        }
        let mut config = config_result.config;

        if let Some(output) = &args.output {
            config.file_name = output.to_string_lossy().to_string();
        }
        if let Some(base_directory) = &args.base_directory {
            config.base_directory = Some(base_directory.clone());
        }
        if let Some(source_root) = &args.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }
        config.validate()?;

        // Absolute paths, so the base directory can be stripped from references
        let source_root = Path::new(&config.source_root)
            .canonicalize()
            .with_context(|| format!("Source root does not exist: {}", config.source_root))?;

        let scan_result = scan_files(
            &source_root,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            source_root,
            files: scan_result.files,
            verbose,
        })
    }

    /// Read and parse every source file.
    ///
    /// Files are parsed in parallel, each with its own `SourceMap`. Results
    /// keep path order; files that fail are returned as issues instead.
    pub fn parse_files(&self) -> (Vec<(String, ParsedSource)>, Vec<ParseErrorIssue>) {
        let files: Vec<&String> = self.files.iter().collect();

        let parse_results: Vec<_> = files
            .par_iter()
            .map(|file_path| {
                let result = fs::read_to_string(file_path)
                    .map_err(|e| anyhow::anyhow!("Failed to read file: {}", e))
                    .and_then(|code| {
                        parse_source(code, file_path, Arc::new(SourceMap::default()))
                    });
                ((*file_path).clone(), result)
            })
            .collect();

        let mut parsed = Vec::with_capacity(parse_results.len());
        let mut errors = Vec::new();

        for (file_path, result) in parse_results {
            match result {
                Ok(source) => parsed.push((file_path, source)),
                Err(e) => {
                    let issue = ParseErrorIssue {
                        file_path,
                        error: e.to_string(),
                    };
                    if self.verbose {
                        eprintln!("{} {}", "warning:".bold().yellow(), issue);
                    }
                    errors.push(issue);
                }
            }
        }

        (parsed, errors)
    }

    /// Run one extraction session over all scanned files.
    ///
    /// Files are visited in path order, so the result does not depend on
    /// parsing order.
    pub fn extract(&self) -> Result<ExtractOutput> {
        let mut session = ExtractionSession::new(self.config.session_options())
            .context("Invalid 'headers' in config")?;

        let (parsed, parse_errors) = self.parse_files();

        let mut files_with_calls = 0;
        for (file_path, source) in &parsed {
            let result = extract_file(file_path, source, &mut session);
            if result.matched_calls == 0 {
                continue;
            }
            files_with_calls += 1;
            if self.verbose {
                eprintln!(
                    "{} {} translation call(s) in {}",
                    "note:".bold(),
                    result.matched_calls,
                    file_path
                );
            }
        }

        let stats = session.stats();
        let file_name = session.file_name().to_string();

        Ok(ExtractOutput {
            file_name,
            catalog: session.into_catalog(),
            stats,
            files_scanned: self.files.len(),
            files_with_calls,
            parse_errors,
        })
    }
}
