use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

use nutritrack::analysis::analyze;
use nutritrack::config::{default_config_path, load_config};
use nutritrack::error::AppError;
use nutritrack::logging::{LoggingGuard, default_log_dir, init_logging};
use nutritrack::report::{render_json, render_text};
use nutritrack::ui::{App, handle_key_event, render};
use nutritrack::usda::UsdaClient;

/// 查询食物营养成分并汇总
#[derive(Debug, Parser)]
#[command(name = "nutritrack", version)]
struct Cli {
    /// 直接分析这些食物 (逗号分隔) 并输出，不进入交互界面
    #[arg(long, value_name = "LIST")]
    foods: Option<String>,

    /// 以 JSON 输出 (配合 --foods)
    #[arg(long, requires = "foods")]
    json: bool,

    /// FoodData Central API key
    #[arg(long, env = "NUTRITRACK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// 配置文件路径 (默认 ~/.config/nutritrack/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    // 持有到退出，所有路径上的日志都会被刷新
    let mut logging: Option<LoggingGuard> = None;

    let code = match run(Cli::parse(), &mut logging) {
        Ok(()) => {
            info!("event=app_exit status=ok");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("event=app_exit status=error cause={e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    };

    drop(logging);
    code
}

fn run(cli: Cli, logging: &mut Option<LoggingGuard>) -> Result<(), AppError> {
    // 配置缺失时在接管终端前报错
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = load_config(&config_path, cli.api_key)?;

    // 日志失败不影响使用
    match default_log_dir() {
        Some(dir) => {
            match init_logging(&config.log_level, &dir) {
                Ok(guard) => *logging = Some(guard),
                Err(e) => eprintln!("warning: {e}"),
            }
        }
        None => eprintln!("warning: cannot determine data directory, logging disabled"),
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let client = UsdaClient::new(&config).map_err(AppError::HttpClient)?;

    if let Some(foods) = cli.foods {
        let analysis = runtime.block_on(analyze(&client, &foods))?;
        let output = if cli.json {
            render_json(&analysis)?
        } else {
            render_text(&analysis)
        };
        println!("{output}");
        return Ok(());
    }

    let mut app = App::default();

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app, &runtime, &client);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(result?)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    runtime: &Runtime,
    client: &UsdaClient,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // 先画出"正在获取"再阻塞执行
        if let Some(input) = app.take_pending() {
            let outcome = runtime.block_on(analyze(client, &input));
            app.finish_analysis(outcome);

            // 丢弃等待期间的按键
            while event::poll(Duration::ZERO)? {
                let _ = event::read()?;
            }
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && handle_key_event(app, key) {
                break;
            }
        }
    }
    Ok(())
}
