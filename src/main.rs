use anyhow::Context;
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use taxe_vacance::app::interactive;
use taxe_vacance::app::render::{view_json, LookupView, TextRenderer};
use taxe_vacance::config::cli::{Command, ExplainArgs, ListArgs, SearchArgs, ShowArgs};
use taxe_vacance::core::classify::{check_reference_links, classify_raw, details, notice_or_fallback};
use taxe_vacance::domain::ports::SearchSettings;
use taxe_vacance::utils::error::ErrorSeverity;
use taxe_vacance::utils::validation::{validate_positive_number, Validate};
use taxe_vacance::utils::logger;
use taxe_vacance::{AppConfig, Cli, CsvDataset, Directory, SearchOptions, Session, TaxType, VacancyError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI arguments: {:?}", cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => report(&e),
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            AppConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path.display()))?
        }
        None => AppConfig::default(),
    };
    // 驗證配置
    config.validate()?;

    // 載入內建的市鎮資料並檢查參考連結
    let directory = Directory::load(&CsvDataset::bundled(), SearchOptions::from_settings(&config))
        .context("failed to load the bundled commune dataset")?;
    tracing::info!("Directory ready with {} communes", directory.len());
    check_reference_links()?;

    let stdout = std::io::stdout();
    let renderer = TextRenderer::for_output(
        config.color() && !cli.no_color,
        stdout.is_terminal(),
        config.show_links(),
    );
    colored::control::set_override(renderer.color);
    let mut out = stdout.lock();

    match &cli.command {
        Command::Search(args) => search(&directory, &config, &renderer, args, &mut out),
        Command::Show(args) => show(&directory, &config, &renderer, args, &mut out),
        Command::Explain(args) => explain(&renderer, args, &mut out),
        Command::List(args) => list(&directory, &renderer, args, &mut out),
        Command::Interactive => {
            let mut session = Session::new(&directory, config.max_candidates());
            let stdin = std::io::stdin();
            interactive::run(&mut session, &renderer, stdin.lock(), &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn search(
    directory: &Directory,
    config: &AppConfig,
    renderer: &TextRenderer,
    args: &SearchArgs,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    if args.all {
        for record in directory.search(&args.query) {
            writeln!(out, "{}", renderer.record_line(record))?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let limit = args.limit.unwrap_or_else(|| config.max_candidates());
    validate_positive_number("--limit", limit, 1)?;
    let candidates = directory.suggest(&args.query, limit);
    write!(out, "{}", renderer.candidates(&candidates))?;
    Ok(ExitCode::SUCCESS)
}

fn show(
    directory: &Directory,
    config: &AppConfig,
    renderer: &TextRenderer,
    args: &ShowArgs,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let record = match directory.find_by_code(&args.commune) {
        Some(record) => record,
        None => {
            let named = directory.find_by_name(&args.commune);
            match named.as_slice() {
                [record] => *record,
                [] => {
                    writeln!(out, "Aucune commune ne correspond à « {} ».", args.commune)?;
                    let suggestions = directory.suggest(&args.commune, config.max_candidates());
                    if !suggestions.is_empty() {
                        writeln!(out, "Suggestions :")?;
                        write!(out, "{}", renderer.candidates(&suggestions))?;
                    }
                    return Ok(ExitCode::FAILURE);
                }
                several => {
                    writeln!(
                        out,
                        "Plusieurs communes s'appellent « {} », précisez le code INSEE :",
                        args.commune
                    )?;
                    write!(out, "{}", renderer.candidates(several))?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    };

    let view = LookupView::for_record(record);
    if args.json {
        writeln!(out, "{}", view_json(&view)?)?;
    } else {
        write!(out, "{}", renderer.view(&view))?;
    }
    Ok(ExitCode::SUCCESS)
}

fn explain(renderer: &TextRenderer, args: &ExplainArgs, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    let notice = notice_or_fallback(classify_raw(&args.tax_type, &args.commune));
    write!(out, "{}", renderer.notice(&notice))?;
    if let Some(sections) = args.tax_type.parse::<TaxType>().ok().and_then(details) {
        writeln!(out)?;
        write!(out, "{}", renderer.details(&sections))?;
    }
    Ok(ExitCode::SUCCESS)
}

fn list(
    directory: &Directory,
    renderer: &TextRenderer,
    args: &ListArgs,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    match &args.tax_type {
        Some(raw) => {
            let tax_type = raw.parse::<TaxType>()?;
            for record in directory.with_tax_type(tax_type) {
                writeln!(out, "{}", renderer.record_line(record))?;
            }
        }
        None => {
            for record in directory.records() {
                writeln!(out, "{}", renderer.record_line(record))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn report(err: &anyhow::Error) -> ExitCode {
    let Some(e) = err.downcast_ref::<VacancyError>() else {
        tracing::error!("❌ {:#}", err);
        eprintln!("❌ {:#}", err);
        return ExitCode::FAILURE;
    };

    tracing::error!(
        "❌ {:#} (Category: {:?}, Severity: {:?})",
        err,
        e.category(),
        e.severity()
    );
    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 分類值無法辨識
        ErrorSeverity::High => 1, // 配置錯誤
        ErrorSeverity::Critical => 3, // 資料或系統錯誤
    };
    ExitCode::from(code)
}
