//! Canteen CLI - loyalty membership for the canteen.

mod config;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use canteen_account::AppContext;
use canteen_core::{records_from_document, Category, MemberId, Period, RegistrationForm};
use canteen_progress::{BasicProgressTracker, MemberProgress, ProgressTracker};
use canteen_storage::{FileSessionStore, JsonStorage, MemberStore};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, DEFAULT_LOG_FILTER};

#[derive(Parser)]
#[command(name = "canteen")]
#[command(about = "Canteen loyalty membership", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: CliConfig,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new member
    Register(RegisterArgs),
    /// Log in with full name and birth date
    Login {
        /// Full name as registered
        #[arg(long)]
        name: String,
        /// Birth date (dd-mm-yyyy, any separator)
        #[arg(long)]
        dob: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in member
    Whoami,
    /// Show points and milestone progress
    Dashboard,
    /// Follow points and milestone progress until interrupted
    Watch,
    /// Show a monthly leaderboard
    Leaderboard {
        /// Category to rank [default: your own]
        #[arg(long)]
        category: Option<Category>,
        /// Month as yyyy-mm [default: current month]
        #[arg(long)]
        period: Option<Period>,
    },
    /// Add points to a member's balance
    Award {
        /// Member ID
        member_id: String,
        /// Points to add
        points: u64,
    },
    /// Import a month's competition sheet exported by the point of sale
    Import {
        /// Month as yyyy-mm
        period: Period,
        /// JSON object keyed by member ID
        file: PathBuf,
    },
    /// List registration choices
    Options {
        /// Only this category
        category: Option<Category>,
    },
}

#[derive(Args)]
struct RegisterArgs {
    /// JSON file with the form; flags override its fields
    #[arg(long)]
    form: Option<PathBuf>,
    /// Full name
    #[arg(long)]
    name: Option<String>,
    /// Laki-Laki or Perempuan
    #[arg(long)]
    gender: Option<String>,
    /// Birth date (dd-mm-yyyy, any separator)
    #[arg(long)]
    dob: Option<String>,
    /// Email
    #[arg(long)]
    email: Option<String>,
    /// Santri, Mahasiswa or Guru/Dosen
    #[arg(long)]
    category: Option<String>,
    /// Santri: formal school
    #[arg(long)]
    unit_education: Option<String>,
    /// Santri: dormitory
    #[arg(long)]
    asrama: Option<String>,
    /// Mahasiswa, Guru/Dosen: phone number
    #[arg(long)]
    phone: Option<String>,
    /// Mahasiswa: faculty
    #[arg(long)]
    faculty: Option<String>,
    /// Mahasiswa: major
    #[arg(long)]
    major: Option<String>,
    /// Mahasiswa: residence
    #[arg(long)]
    residence: Option<String>,
    /// Guru/Dosen: institution
    #[arg(long)]
    institution: Option<String>,
    /// Guru/Dosen: work location
    #[arg(long)]
    work_location: Option<String>,
}

impl RegisterArgs {
    async fn into_form(self) -> Result<RegistrationForm> {
        let mut form = match &self.form {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading form {}", path.display()))?;
                serde_json::from_str(&raw).with_context(|| format!("parsing form {}", path.display()))?
            }
            None => RegistrationForm::default(),
        };

        let fields = [
            (self.name, &mut form.full_name),
            (self.gender, &mut form.gender),
            (self.dob, &mut form.date_of_birth),
            (self.email, &mut form.email),
            (self.category, &mut form.category),
            (self.unit_education, &mut form.unit_education),
            (self.asrama, &mut form.asrama),
            (self.phone, &mut form.phone_number),
            (self.faculty, &mut form.faculty),
            (self.major, &mut form.major),
            (self.residence, &mut form.residence),
            (self.institution, &mut form.institution),
            (self.work_location, &mut form.work_location),
        ];
        for (flag, field) in fields {
            if let Some(value) = flag {
                *field = value;
            }
        }
        Ok(form)
    }
}

type CliContext = AppContext<JsonStorage, FileSessionStore>;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    // Open storage
    let storage = Arc::new(
        JsonStorage::new(&config.data_dir)
            .await
            .with_context(|| format!("opening data dir {}", config.data_dir.display()))?,
    );
    let sessions = FileSessionStore::new(config.session_dir()).await?;
    let mut ctx: CliContext = AppContext::start(Arc::clone(&storage), sessions).await?;

    match cli.command {
        Commands::Register(args) => {
            let form = args.into_form().await?;
            let member = ctx.register(&form).await?;
            if cli.json {
                return print_json(&member);
            }
            println!("Registrasi berhasil: {} ({})", member.full_name, member.id);
            println!("Masuk dengan: canteen login --name \"{}\" --dob {}", member.full_name, member.date_of_birth);
        }
        Commands::Login { name, dob } => {
            let session = ctx.login(&name, &dob).await?;
            if cli.json {
                return print_json(session.member());
            }
            println!("Masuk sebagai {} ({})", session.member().full_name, session.member().category());
        }
        Commands::Logout => {
            ctx.logout().await?;
            println!("Berhasil keluar");
        }
        Commands::Whoami => {
            let session = ctx.require_session()?;
            let member = match storage.load_member(session.member_id()).await? {
                Some(member) => member,
                None => {
                    warn!(member = %session.member_id(), "session member missing from store");
                    session.member().clone()
                }
            };
            if cli.json {
                return print_json(&member);
            }
            println!("{}", render::profile(&member));
        }
        Commands::Dashboard => {
            let tracker = tracker(&storage, &config).await?;
            let id = ctx.require_session()?.member_id();
            let Some(current) = tracker.member_progress(id).await? else {
                bail!("akun {id} tidak ditemukan");
            };
            if cli.json {
                return print_json(&current);
            }
            println!("{}", render::dashboard(&current, tracker.ladder()));
        }
        Commands::Watch => watch(&ctx, &storage, &config, cli.json).await?,
        Commands::Leaderboard { category, period } => {
            let tracker = tracker(&storage, &config).await?;
            let session = ctx.require_session()?;
            let category = category.unwrap_or_else(|| session.member().category());
            let period = period.unwrap_or_else(Period::current);

            let ranking = tracker.leaderboard(category, period, session.member_id()).await?;
            if cli.json {
                return print_json(&ranking);
            }
            println!("{}", render::leaderboard(&ranking, period));
        }
        Commands::Award { member_id, points } => {
            let member = storage.award_points(&MemberId::from(member_id.as_str()), points).await?;
            if cli.json {
                return print_json(&member);
            }
            println!("+{points} points untuk {} (total {})", member.full_name, member.points);
        }
        Commands::Import { period, file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let document: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&raw).with_context(|| format!("parsing {}", file.display()))?;
            let records = records_from_document(&document);
            storage.save_competition(period, &records).await?;
            println!("{} data kompetisi diimpor untuk {}", records.len(), period.label());
        }
        Commands::Options { category } => {
            println!("{}", render::options(category));
        }
    }

    Ok(())
}

async fn tracker(storage: &Arc<JsonStorage>, config: &CliConfig) -> Result<BasicProgressTracker<JsonStorage>> {
    let ladder = config.ladder().await?;
    Ok(BasicProgressTracker::new(Arc::clone(storage)).with_ladder(ladder))
}

async fn watch(ctx: &CliContext, storage: &Arc<JsonStorage>, config: &CliConfig, json: bool) -> Result<()> {
    let tracker = tracker(storage, config).await?;
    let id = ctx.require_session()?.member_id();

    let mut progress = tracker.watch(id).await?;
    let Some(current) = progress.current() else {
        bail!("akun {id} tidak ditemukan");
    };
    show_progress(&current, &tracker, json)?;

    let mut refresh = tokio::time::interval(config.poll_interval());
    info!(member = %id, "watching for point updates");

    loop {
        tokio::select! {
            update = progress.next() => match update {
                Some(current) => show_progress(&current, &tracker, json)?,
                None => break,
            },
            _ = refresh.tick() => {
                storage.refresh_subscriptions().await?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }
    Ok(())
}

fn show_progress(
    current: &MemberProgress,
    tracker: &BasicProgressTracker<JsonStorage>,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(current)?);
    } else {
        println!("{}\n", render::dashboard(current, tracker.ladder()));
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
