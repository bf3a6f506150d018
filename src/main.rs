use std::io::IsTerminal;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};

use commitlens_audit::report::{audit, Report};
use commitlens_core::{LensConfig, OutputFormat, Severity, Verdict};

mod git;

#[derive(Parser)]
#[command(
    name = "commitlens",
    version,
    about = "Commit-diff auditor — does your message match the diff?",
    long_about = "Commitlens validates that commit messages match their diffs.\n\n\
                   commitlint checks format; commitlens checks truth. It parses a commit's\n\
                   diff, extracts what the message claims, and reports mismatches between\n\
                   the two. Advisory only: findings inform, they never gate a commit.\n\n\
                   Examples:\n  \
                     commitlens check                  Audit HEAD\n  \
                     commitlens check abc1234          Audit a specific commit\n  \
                     commitlens check --file c.patch --message 'fix typo'\n  \
                     commitlens log --limit 20         Audit recent commits\n  \
                     commitlens init                   Create a .commitlens.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .commitlens.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text      Human-readable report (default)\n  \
                         json      Machine-readable JSON with camelCase keys\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Audit one commit's message against its diff
    #[command(long_about = "Audit one commit's message against its diff.\n\n\
        By default resolves a git revision in the repository at --repo. With\n\
        --file, audits a patch without touching git; pass the message via\n\
        --message or --message-file, and use '--file -' to read the patch\n\
        from stdin. Merge commits are skipped.\n\n\
        Exit status is informational: 0 consistent, 1 findings, 2 failure.\n\n\
        Examples:\n  commitlens check\n  commitlens check HEAD~3 --repo ../service\n  \
        git show HEAD | commitlens check --file - --message 'fix typo'")]
    Check {
        /// Commit reference to audit (default: HEAD)
        #[arg(default_value = "HEAD")]
        reference: String,

        /// Repository path
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Read a unified diff from a file instead of git ("-" for stdin)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Commit message to audit against (requires --file)
        #[arg(long, short)]
        message: Option<String>,

        /// Read the commit message from a file (requires --file)
        #[arg(long)]
        message_file: Option<PathBuf>,
    },
    /// Audit recent commits and summarize the results
    #[command(long_about = "Audit recent commits and summarize the results.\n\n\
        Walks HEAD backwards, audits every non-merge commit, and prints one\n\
        line per commit plus a consistency summary.\n\n\
        Examples:\n  commitlens log\n  commitlens log --limit 50 --format json")]
    Log {
        /// How many commits to audit (default: from config, then 10)
        #[arg(long)]
        limit: Option<usize>,

        /// Repository path
        #[arg(long, default_value = ".")]
        repo: PathBuf,
    },
    /// Create a default .commitlens.toml configuration file
    #[command(long_about = "Create a default .commitlens.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .commitlens.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// One audited (or skipped) commit, for JSON output.
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CommitAudit {
    id: String,
    date: String,
    subject: String,
    skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<Report>,
}

impl CommitAudit {
    fn skipped(record: &git::CommitRecord) -> Self {
        Self {
            id: record.id.clone(),
            date: record.date(),
            subject: record.summary.clone(),
            skipped: true,
            reason: Some("merge commit"),
            report: None,
        }
    }

    fn audited(record: &git::CommitRecord, report: Report) -> Self {
        Self {
            id: record.id.clone(),
            date: record.date(),
            subject: record.summary.clone(),
            skipped: false,
            reason: None,
            report: Some(report),
        }
    }
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        println!(
            "\x1b[1mcommitlens\x1b[0m v{version} — does your commit message match the diff?\n"
        );

        println!("Quick start:");
        println!("  \x1b[36mcommitlens check\x1b[0m              Audit the latest commit");
        println!("  \x1b[36mcommitlens log --limit 20\x1b[0m     Audit recent commits");
        println!(
            "  \x1b[36mcommitlens init\x1b[0m               Create a .commitlens.toml config file\n"
        );

        println!("All commands:");
        println!("  \x1b[32mcheck\x1b[0m  Audit one commit (git ref, patch file, or stdin)");
        println!("  \x1b[32mlog\x1b[0m    Audit recent commits with a summary");
        println!("  \x1b[32minit\x1b[0m   Create default configuration\n");
    } else {
        println!("commitlens v{version} — does your commit message match the diff?\n");

        println!("Quick start:");
        println!("  commitlens check              Audit the latest commit");
        println!("  commitlens log --limit 20     Audit recent commits");
        println!("  commitlens init               Create a .commitlens.toml config file\n");

        println!("All commands:");
        println!("  check  Audit one commit (git ref, patch file, or stdin)");
        println!("  log    Audit recent commits with a summary");
        println!("  init   Create default configuration\n");
    }

    println!("Run 'commitlens <command> --help' for details.");
}

fn read_diff_input(file: &std::path::Path) -> Result<String> {
    if file == std::path::Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .into_diagnostic()
            .wrap_err("reading stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err(format!("reading {}", file.display()))
}

fn verdict_label(verdict: Verdict, use_color: bool) -> String {
    match (verdict, use_color) {
        (Verdict::Consistent, true) => "\x1b[32m\x1b[1mCONSISTENT\x1b[0m".into(),
        (Verdict::Consistent, false) => "CONSISTENT".into(),
        (Verdict::Inconsistent, true) => "\x1b[33m\x1b[1mINCONSISTENT\x1b[0m".into(),
        (Verdict::Inconsistent, false) => "INCONSISTENT".into(),
    }
}

fn severity_icon(severity: Severity, use_color: bool) -> String {
    match (severity, use_color) {
        (Severity::Warn, true) => "\x1b[33m!\x1b[0m".into(),
        (Severity::Warn, false) => "!".into(),
        (Severity::Info, true) => "\x1b[2m~\x1b[0m".into(),
        (Severity::Info, false) => "~".into(),
    }
}

fn render_report(report: &Report, use_color: bool) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "  {}  {}",
        verdict_label(report.verdict, use_color),
        report.subject
    ));

    let mut summary = format!(
        "+{}/-{} in {} file(s)",
        report.stats.lines_added, report.stats.lines_removed, report.stats.files_touched
    );
    if report.stats.renames > 0 {
        summary.push_str(&format!(", {} rename(s)", report.stats.renames));
    }
    if use_color {
        lines.push(format!("         \x1b[2m{summary}\x1b[0m"));
    } else {
        lines.push(format!("         {summary}"));
    }

    if report.degraded {
        lines.push("         note: diff text could not be parsed; nothing measurable".into());
    }

    for finding in &report.findings {
        lines.push(format!(
            "         {} {}: {}",
            severity_icon(finding.severity, use_color),
            finding.check,
            finding.explanation
        ));
    }

    lines.join("\n")
}

fn emit_report(report: &Report, format: OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report).into_diagnostic()?);
        }
        OutputFormat::Markdown => {
            print!("{}", report.to_markdown());
        }
        OutputFormat::Text => {
            println!();
            println!("{}", render_report(report, use_color));
            println!();
        }
    }
    Ok(())
}

struct CheckArgs {
    reference: String,
    repo: PathBuf,
    file: Option<PathBuf>,
    message: Option<String>,
    message_file: Option<PathBuf>,
}

fn run_check(
    args: CheckArgs,
    config: &LensConfig,
    format: OutputFormat,
    use_color: bool,
) -> Result<ExitCode> {
    // patch mode: no git involved at all
    if args.file.is_some() || args.message.is_some() || args.message_file.is_some() {
        let Some(file) = args.file else {
            miette::bail!(miette::miette!(
                help = "pass --file <patch> (or --file -) alongside --message",
                "--message and --message-file only apply when auditing a patch file"
            ));
        };
        let diff_text = read_diff_input(&file)?;
        let message_text = match (args.message, args.message_file) {
            (Some(text), _) => text,
            (None, Some(path)) => std::fs::read_to_string(&path)
                .into_diagnostic()
                .wrap_err(format!("reading {}", path.display()))?,
            (None, None) => miette::bail!(miette::miette!(
                help = "pass --message 'subject...' or --message-file <path>",
                "auditing a patch file requires the commit message"
            )),
        };

        let report = audit(&diff_text, &message_text, config);
        emit_report(&report, format, use_color)?;
        return Ok(ExitCode::from(report.verdict.exit_code()));
    }

    let record = git::load_commit(&args.repo, &args.reference).into_diagnostic()?;

    if record.is_merge {
        match format {
            OutputFormat::Json => {
                let entry = CommitAudit::skipped(&record);
                println!("{}", serde_json::to_string_pretty(&entry).into_diagnostic()?);
            }
            _ => {
                println!("  SKIP  {}  {}  (merge commit)", record.id, record.summary);
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = audit(&record.diff_text, &record.message, config);
    emit_report(&report, format, use_color)?;
    Ok(ExitCode::from(report.verdict.exit_code()))
}

fn run_log(
    repo: &std::path::Path,
    limit: Option<usize>,
    config: &LensConfig,
    format: OutputFormat,
    use_color: bool,
) -> Result<ExitCode> {
    let limit = limit.unwrap_or(config.log.limit);
    let records = git::recent_commits(repo, limit).into_diagnostic()?;

    let mut entries: Vec<CommitAudit> = Vec::new();
    let mut consistent = 0usize;
    let mut inconsistent = 0usize;
    let mut skipped = 0usize;

    for record in &records {
        if record.is_merge {
            skipped += 1;
            entries.push(CommitAudit::skipped(record));
            continue;
        }
        let report = audit(&record.diff_text, &record.message, config);
        match report.verdict {
            Verdict::Consistent => consistent += 1,
            Verdict::Inconsistent => inconsistent += 1,
        }
        entries.push(CommitAudit::audited(record, report));
    }

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).into_diagnostic()?
            );
        }
        OutputFormat::Markdown => {
            println!("# Commit Audit Log\n");
            for entry in &entries {
                if entry.skipped {
                    println!("## {} {} (skipped: merge commit)\n", entry.id, entry.subject);
                    continue;
                }
                println!("## {} {}\n", entry.id, entry.subject);
                if let Some(report) = &entry.report {
                    print!("{}", report.to_markdown());
                }
            }
        }
        OutputFormat::Text => {
            println!();
            println!("  commitlens — auditing last {} commit(s)", records.len());
            println!("  {}", "-".repeat(64));

            for (record, entry) in records.iter().zip(&entries) {
                if entry.skipped {
                    println!(
                        "  SKIP          {}  {}  (merge commit)",
                        record.id, record.summary
                    );
                    continue;
                }
                if let Some(report) = &entry.report {
                    println!(
                        "  {:<12}  {}  {}  {}",
                        verdict_label(report.verdict, use_color),
                        record.id,
                        record.date(),
                        record.summary
                    );
                    if report.degraded {
                        println!("            note: diff text could not be parsed");
                    }
                    for finding in &report.findings {
                        println!(
                            "            {} {}: {}",
                            severity_icon(finding.severity, use_color),
                            finding.check,
                            finding.explanation
                        );
                    }
                }
            }

            println!("  {}", "-".repeat(64));
            println!("  {consistent} consistent  {inconsistent} inconsistent  {skipped} skipped");
            println!();
        }
    }

    Ok(if inconsistent > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn run_init() -> Result<ExitCode> {
    let path = std::path::Path::new(".commitlens.toml");
    if path.exists() {
        miette::bail!(miette::miette!(
            help = "remove it first, or edit it in place",
            ".commitlens.toml already exists"
        ));
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .into_diagnostic()
        .wrap_err("writing .commitlens.toml")?;
    println!("Created .commitlens.toml");
    Ok(ExitCode::SUCCESS)
}

const DEFAULT_CONFIG: &str = r#"# commitlens configuration
# See: https://github.com/commitlens/commitlens

[checks]
# Changed lines a "typo"-class message may plausibly cover
# small_change_max_lines = 50
# Share of changed lines going the wrong way before the direction check fires
# direction_dominance = 0.8
# Minimum changed lines before the direction check applies at all
# direction_noise_floor = 10
# Changed lines above which a terse message is flagged
# large_diff_lines = 200
# Subject word count below which a message counts as terse
# short_message_words = 4

[vocab]
# Extensions add to the built-in vocabularies, they never replace them
# extra_small_words = ["trivial"]
# extra_rename_tokens = ["relocate"]
# extra_doc_patterns = ["man/*"]

[log]
# How many recent commits `commitlens log` audits
# limit = 10
"#;

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => LensConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".commitlens.toml");
            if default_path.exists() {
                LensConfig::from_file(default_path).into_diagnostic()?
            } else {
                LensConfig::default()
            }
        }
    };

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };

    if cli.verbose {
        eprintln!("format: {}", cli.format);
        eprintln!(
            "thresholds: size>{} lines, direction>={:.0}% (floor {} lines)",
            config.checks.small_change_max_lines,
            config.checks.direction_dominance * 100.0,
            config.checks.direction_noise_floor,
        );
    }

    match cli.command {
        None => {
            print_welcome(use_color);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Check {
            reference,
            repo,
            file,
            message,
            message_file,
        }) => run_check(
            CheckArgs {
                reference,
                repo,
                file,
                message,
                message_file,
            },
            &config,
            cli.format,
            use_color,
        ),
        Some(Command::Log { limit, ref repo }) => {
            run_log(repo, limit, &config, cli.format, use_color)
        }
        Some(Command::Init) => run_init(),
        Some(Command::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "commitlens",
                &mut std::io::stdout(),
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error:?}");
            // operational failure, distinct from "findings exist"
            ExitCode::from(2)
        }
    }
}
