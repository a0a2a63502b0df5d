use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use exam_drill::{
    ai::{ModelConfig, OpenRouterClient, OpenRouterGateway},
    ai_worker::spawn_ai_worker,
    app::App,
    config::AppConfig,
    input::handle_key,
    logger, ui,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<(), Box<dyn Error>> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("exam-drill: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logger::init(&config.log_path) {
        eprintln!(
            "exam-drill: cannot open log file {}: {}",
            config.log_path.display(),
            e
        );
    }
    logger::log(&format!("Starting with model {}", config.model));

    let client = match OpenRouterClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("exam-drill: {}", e);
            std::process::exit(1);
        }
    };
    let gateway = Arc::new(OpenRouterGateway::new(
        client,
        ModelConfig::new(config.model.clone(), config.max_tokens),
    ));

    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let _worker = spawn_ai_worker(gateway, response_tx, request_rx)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(request_tx, response_rx);
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    logger::log("Shutting down");
    result.map_err(Into::into)
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.poll_ai_responses();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
