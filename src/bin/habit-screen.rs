use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use habit_screen::{
    ArtifactNaming, DEFAULT_SUBTITLE, DirArtifactStore, HabitBook, NoopWallpaperSetter, Publisher,
    ScriptWallpaperSetter, Tracked, WallpaperConfig, WallpaperSetter,
};

#[derive(Parser, Debug)]
#[command(name = "habit-screen", version, about = "Habit Screen CLI")]
struct Cli {
    /// Habit data file.
    #[arg(long, global = true, default_value = "habitos.json")]
    data: PathBuf,

    /// Wallpaper style overrides (JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory generated wallpapers are written to and pruned from.
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    /// Script that applies an image as the desktop wallpaper.
    #[arg(long, global = true, default_value = "set_wallpaper.sh")]
    script: PathBuf,

    /// Write the image but do not apply it as wallpaper.
    #[arg(long, global = true)]
    no_wallpaper: bool,

    /// Day the grid ends on (defaults to today, local time).
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new habit.
    Add(AddArgs),
    /// List all habits.
    List,
    /// Switch the active wallpaper to a different habit.
    Switch {
        habit: String,
    },
    /// Track today for a habit (defaults to the active habit).
    Now {
        habit: Option<String>,
    },
    /// Regenerate the wallpaper without tracking anything.
    Render {
        habit: Option<String>,
    },
}

#[derive(Parser, Debug)]
struct AddArgs {
    name: String,

    /// Display title on the wallpaper.
    #[arg(long)]
    title: String,

    /// Subtitle under the title.
    #[arg(long, default_value = DEFAULT_SUBTITLE)]
    subtitle: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut book = HabitBook::load(&cli.data)
        .with_context(|| format!("load habits '{}'", cli.data.display()))?;

    match &cli.cmd {
        Command::Add(args) => {
            let slug = book.add(&args.name, &args.title, &args.subtitle)?;
            save(&book, &cli)?;
            println!("Added habit: {slug}");
        }
        Command::List => print_table(&book),
        Command::Switch { habit } => {
            let slug = book.switch(habit)?;
            save(&book, &cli)?;
            regenerate(&book, &slug, today, &cli)?;
            println!("Switched to {slug} and updated wallpaper.");
        }
        Command::Now { habit } => {
            let (slug, tracked) = book.track(habit.as_deref(), today)?;
            match tracked {
                Tracked::Added => {
                    save(&book, &cli)?;
                    println!("Tracked today for {slug}!");
                }
                Tracked::AlreadyTracked => println!("Today is already tracked for {slug}."),
            }
            regenerate(&book, &slug, today, &cli)?;
        }
        Command::Render { habit } => {
            let slug = book.resolve(habit.as_deref())?;
            regenerate(&book, &slug, today, &cli)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn save(book: &HabitBook, cli: &Cli) -> anyhow::Result<()> {
    book.save(&cli.data)
        .with_context(|| format!("save habits '{}'", cli.data.display()))
}

fn load_config(cli: &Cli) -> anyhow::Result<WallpaperConfig> {
    match &cli.config {
        Some(path) => Ok(WallpaperConfig::from_path(path)?),
        None => Ok(WallpaperConfig::default()),
    }
}

fn regenerate(book: &HabitBook, slug: &str, today: NaiveDate, cli: &Cli) -> anyhow::Result<()> {
    let cfg = load_config(cli)?;
    let snapshot = book.snapshot(slug)?;
    let surface = habit_screen::render(&snapshot, today, &cfg)
        .with_context(|| format!("render wallpaper for '{slug}'"))?;

    let setter: Box<dyn WallpaperSetter> = if cli.no_wallpaper {
        Box::new(NoopWallpaperSetter)
    } else {
        Box::new(ScriptWallpaperSetter::new(&cli.script))
    };
    let store = DirArtifactStore::new(&cli.out_dir)?;
    let mut publisher = Publisher::new(store, setter, ArtifactNaming::from_config(&cfg));
    let path = publisher
        .publish_now(&surface)
        .with_context(|| format!("publish wallpaper to '{}'", cli.out_dir.display()))?;

    println!("Wallpaper generated: {}", path.display());
    Ok(())
}

fn print_table(book: &HabitBook) {
    let rows = book.summaries();
    let slug_w = rows.iter().map(|r| r.slug.len()).max().unwrap_or(0).max(5);
    let title_w = rows.iter().map(|r| r.title.len()).max().unwrap_or(0).max(5);

    println!(
        "{:^6}  {:<slug_w$}  {:<title_w$}  {:>5}  Last Tracked",
        "Active", "Habit", "Title", "Count"
    );
    for row in rows {
        println!(
            "{:^6}  {:<slug_w$}  {:<title_w$}  {:>5}  {}",
            if row.active { "*" } else { "" },
            row.slug,
            row.title,
            row.count,
            row.last_tracked.as_deref().unwrap_or("-"),
        );
    }
}
