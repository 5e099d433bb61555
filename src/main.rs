use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use clap::Parser;

use gdsmell::cli::{
    CheckArgs, Cli, ColorChoice, Commands, ConfigAction, ConfigArgs, ConfigFormat, InitArgs,
};
use gdsmell::config::{Config, ConfigLoader, FileConfigLoader, LoadResult};
use gdsmell::engine::{AnalysisReport, Engine};
use gdsmell::output::{
    ColorMode, ErrorOutput, GithubFormatter, JsonFormatter, OutputFormat, OutputFormatter,
    ScanProgress, TextFormatter,
};
use gdsmell::rules::{Severity, Violation};
use gdsmell::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS_FOUND, GdsmellError};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();
    let errors = ErrorOutput::new(color_choice_to_mode(cli.color));

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli, &errors),
        Commands::Rules => run_rules(&cli, &errors),
        Commands::Init(args) => run_init(args, &errors),
        Commands::Config(args) => run_config(args, &cli, &errors),
    };

    std::process::exit(exit_code);
}

fn run_check(args: &CheckArgs, cli: &Cli, errors: &ErrorOutput) -> i32 {
    match run_check_impl(args, cli, errors) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            errors.report(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli, errors: &ErrorOutput) -> gdsmell::Result<i32> {
    // 1. Load configuration, falling back to defaults on failure
    let mut config = load_config_or_default(args.config.as_deref(), cli, errors);

    // 2. Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    // 3. Analyze
    let engine = Engine::new(&config);
    let report = analyze(&engine, &args.path, cli.quiet)?;

    for skipped in &report.skipped {
        errors.report_as_warning(skipped);
    }
    if cli.verbose >= 1 {
        errors.print_info(&format!(
            "Analyzed {} file(s) with {} rule(s)",
            report.files_analyzed,
            engine.rules().len()
        ));
    }

    // 4. Format and write output
    let mut color_mode = color_choice_to_mode(cli.color);
    if args.output.is_some() && color_mode == ColorMode::Auto {
        color_mode = ColorMode::Never;
    }
    let output = format_output(args.format, &report.violations, color_mode)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    // 5. Determine exit code
    Ok(exit_code_for(&report.violations, config.fail_on_warning))
}

fn load_config_or_default(
    config_path: Option<&Path>,
    cli: &Cli,
    errors: &ErrorOutput,
) -> Config {
    if cli.no_config {
        return Config::default();
    }

    match load_config(config_path) {
        Ok(LoadResult { config, source }) => {
            if cli.verbose >= 1
                && let Some(path) = source
            {
                errors.print_info(&format!("Using config: {}", path.display()));
            }
            config
        }
        Err(e) => {
            errors.report_as_warning(&e);
            errors.print_warning("Falling back to the default configuration", None);
            Config::default()
        }
    }
}

fn load_config(config_path: Option<&Path>) -> gdsmell::Result<LoadResult> {
    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(max_line_length) = args.max_line_length {
        config.max_line_length = max_line_length;
    }

    config.disabled_rules.extend(
        args.disable
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty()),
    );
    config.exclude.extend(args.exclude.iter().cloned());

    if args.fail_on_warning {
        config.fail_on_warning = true;
    }
}

fn analyze(engine: &Engine, path: &Path, quiet: bool) -> gdsmell::Result<AnalysisReport> {
    if path.is_file() {
        return engine.analyze(path);
    }

    let files = engine.collect_files(path)?;
    let progress = ScanProgress::new(u64::try_from(files.len()).unwrap_or(u64::MAX), quiet);
    let report = engine.analyze_files(&files, || progress.inc());
    progress.finish();

    Ok(report)
}

fn format_output(
    format: OutputFormat,
    violations: &[Violation],
    color_mode: ColorMode,
) -> gdsmell::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode).format(violations),
        OutputFormat::Json => JsonFormatter.format(violations),
        OutputFormat::Github => GithubFormatter.format(violations),
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> gdsmell::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

fn exit_code_for(violations: &[Violation], fail_on_warning: bool) -> i32 {
    let has_errors = violations.iter().any(|v| v.severity == Severity::Error);
    let has_warnings = violations.iter().any(|v| v.severity == Severity::Warning);

    if has_errors || (fail_on_warning && has_warnings) {
        EXIT_VIOLATIONS_FOUND
    } else {
        EXIT_SUCCESS
    }
}

fn run_rules(cli: &Cli, errors: &ErrorOutput) -> i32 {
    let config = if cli.no_config {
        Config::default()
    } else {
        load_config(None).map_or_else(
            |e| {
                errors.report_as_warning(&e);
                Config::default()
            },
            |result| result.config,
        )
    };

    // Catalog lists every rule; the config only decides the "disabled" marker
    let catalog = Engine::default();
    let mut output = String::new();
    for rule in catalog.rules() {
        let status = if config.is_rule_disabled(rule.id()) {
            " (disabled)"
        } else {
            ""
        };
        let _ = writeln!(
            output,
            "{}  {:<7}  {:<11}  {}{status}",
            rule.id(),
            rule.severity(),
            rule.category(),
            rule.name()
        );
        let _ = writeln!(output, "      {}", rule.description());
    }

    print!("{output}");
    EXIT_SUCCESS
}

fn run_init(args: &InitArgs, errors: &ErrorOutput) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            errors.report(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_init_impl(args: &InitArgs) -> gdsmell::Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(GdsmellError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    let template = serde_json::to_string_pretty(&Config::default())?;
    fs::write(output_path, format!("{template}\n"))?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

fn run_config(args: &ConfigArgs, cli: &Cli, errors: &ErrorOutput) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config.as_deref(), errors),
        ConfigAction::Show { config, format } => {
            run_config_show(config.as_deref(), *format, cli, errors)
        }
    }
}

fn run_config_validate(config_path: Option<&Path>, errors: &ErrorOutput) -> i32 {
    let result = match load_config(config_path) {
        Ok(result) => result,
        Err(e) => {
            errors.report(&e);
            return EXIT_CONFIG_ERROR;
        }
    };

    let catalog = Engine::default();
    for id in &result.config.disabled_rules {
        if !catalog
            .rules()
            .iter()
            .any(|rule| rule.id().eq_ignore_ascii_case(id.trim()))
        {
            errors.print_warning(
                &format!("Unknown rule id in disabled_rules: {id}"),
                Some("Run `gdsmell rules` to list the available rules"),
            );
        }
    }

    match result.source {
        Some(path) => println!("Configuration is valid: {}", path.display()),
        None => println!("No configuration file found; built-in defaults are valid"),
    }
    EXIT_SUCCESS
}

fn run_config_show(
    config_path: Option<&Path>,
    format: ConfigFormat,
    cli: &Cli,
    errors: &ErrorOutput,
) -> i32 {
    let result = if cli.no_config && config_path.is_none() {
        Ok(LoadResult {
            config: Config::default(),
            source: None,
        })
    } else {
        load_config(config_path)
    };

    match result.and_then(|result| format_config(&result, format)) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            errors.report(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

fn format_config(result: &LoadResult, format: ConfigFormat) -> gdsmell::Result<String> {
    if format == ConfigFormat::Json {
        let json = serde_json::to_string_pretty(&result.config)?;
        return Ok(format!("{json}\n"));
    }

    let config = &result.config;
    let source = result
        .source
        .as_ref()
        .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());

    let mut output = String::new();
    let _ = writeln!(output, "# Effective configuration ({source})");
    let _ = writeln!(output, "max_line_length: {}", config.max_line_length);
    let _ = writeln!(output, "disabled_rules: {}", format_list(&config.disabled_rules));
    let _ = writeln!(output, "extensions: {}", format_list(&config.extensions));
    let _ = writeln!(output, "exclude: {}", format_list(&config.exclude));
    let _ = writeln!(output, "respect_gitignore: {}", config.respect_gitignore);
    let _ = writeln!(output, "fail_on_warning: {}", config.fail_on_warning);
    Ok(output)
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
