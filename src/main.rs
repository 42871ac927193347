mod app;
mod config;
mod data;
mod glyph;
mod route;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::borrow::Cow;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup, Screen};
use config::AppConfig;
use data::HabitatCollection;
use glyph::EmojiTable;
use route::{Route, RouteHistory};
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "holozoo")]
#[command(version = "0.1.0")]
#[command(about = "Four-sided animal holograms for Pepper's Ghost pyramids")]
struct Args {
    /// Route to open, e.g. /hologram/Forest/bengal-tiger (an /animal/... path works too)
    #[arg(conflicts_with_all = ["habitat", "animal"])]
    route: Option<String>,

    /// Habitat key (Forest, Ocean, Desert, Arctic)
    #[arg(long)]
    habitat: Option<String>,

    /// Animal id within the habitat
    #[arg(short, long)]
    animal: Option<String>,

    /// Use this dataset instead of the built-in one
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Print the dataset with each animal's glyph as JSON
    #[arg(short, long)]
    list: bool,

    /// Resolve the route parameters and print the result as JSON
    #[arg(short, long)]
    resolve: bool,
}

fn main() -> Result<()> {
    // Initialize logging (stderr keeps stdout free for JSON and hand-off routes)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();

    let data = load_dataset(args.data.as_ref(), &config)?;
    let glyphs = EmojiTable::with_overrides(&config.glyphs, config.default_glyph.as_deref());

    // Handle CLI-only commands
    if args.list {
        return print_dataset(&data, &glyphs);
    }

    let (habitat, animal_id) = route_params(&args)?;

    if args.resolve {
        return print_resolution(&data, &glyphs, &habitat, &animal_id);
    }

    ui::init_theme(Theme::from_config(&config.theme));
    let screen = Screen::resolve(&data, &glyphs, &habitat, &animal_id);
    let app = App::new(screen, RouteHistory::default(), config.show_instructions);

    // Hand the requested route to whoever launched us
    if let Some(next) = run_tui(app)? {
        println!("{}", next);
    }
    Ok(())
}

/// `--data` must load; a broken dataset from config only warns
fn load_dataset(cli_path: Option<&PathBuf>, config: &AppConfig) -> Result<Cow<'static, HabitatCollection>> {
    if let Some(path) = cli_path {
        let data = HabitatCollection::from_path(path)
            .with_context(|| format!("Could not load dataset {}", path.display()))?;
        return Ok(Cow::Owned(data));
    }

    if let Some(path) = &config.dataset {
        match HabitatCollection::from_path(path) {
            Ok(data) => return Ok(Cow::Owned(data)),
            Err(e) => tracing::warn!("Falling back to built-in dataset: {}", e),
        }
    }

    Ok(Cow::Borrowed(HabitatCollection::builtin()?))
}

/// Missing parameters stay empty and resolve to the not-found screen
fn route_params(args: &Args) -> Result<(String, String)> {
    if let Some(raw) = &args.route {
        let route: Route = raw.parse().with_context(|| format!("Invalid route '{}'", raw))?;
        let (habitat, animal_id) = route
            .animal_params()
            .ok_or_else(|| anyhow::anyhow!("Route {} does not name an animal", route))?;
        return Ok((habitat.to_string(), animal_id.to_string()));
    }

    Ok((
        args.habitat.clone().unwrap_or_default(),
        args.animal.clone().unwrap_or_default(),
    ))
}

fn print_dataset(data: &HabitatCollection, glyphs: &EmojiTable) -> Result<()> {
    let habitats: serde_json::Map<String, serde_json::Value> = data
        .habitats()
        .map(|(habitat, animals)| {
            let animals: Vec<serde_json::Value> = animals
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "id": a.id,
                        "name": a.name,
                        "glyph": glyphs.glyph(&a.name),
                        "hologram": Route::hologram(habitat.as_str(), a.id.as_str()).to_string(),
                    })
                })
                .collect();
            (habitat.to_string(), serde_json::Value::Array(animals))
        })
        .collect();

    let output = serde_json::json!({
        "defaultGlyph": glyphs.default_glyph(),
        "habitats": habitats,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_resolution(data: &HabitatCollection, glyphs: &EmojiTable, habitat: &str, animal_id: &str) -> Result<()> {
    let output = match Screen::resolve(data, glyphs, habitat, animal_id) {
        Screen::Found(view) => serde_json::json!({
            "found": true,
            "habitat": view.habitat,
            "animalId": view.animal.id,
            "animal": view.animal,
            "glyph": view.glyph,
            "routes": {
                "detail": view.detail_route().to_string(),
                "quiz": view.quiz_route().to_string(),
            },
        }),
        Screen::NotFound { habitat, animal_id } => serde_json::json!({
            "found": false,
            "habitat": habitat,
            "animalId": animal_id,
        }),
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn run_tui(mut app: App<RouteHistory>) -> Result<Option<Route>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<RouteHistory>,
) -> Result<Option<Route>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(None),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(None)
                        }
                        _ => app.handle_key(key),
                    }
                }
            }
        }

        // This screen is done once it asked to go somewhere else
        if let Some(next) = app.navigator().last() {
            return Ok(Some(next.clone()));
        }
    }
}
