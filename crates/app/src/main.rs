mod demo;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lms_core::model::{Role, Session, TeamId, UserId};
use remote::{InMemoryRepository, Remote, RemoteConfig};
use services::{AppServices, CalendarService, Clock, CourseService, TeamService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUserId { raw: String },
    InvalidTeamId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user-id value: {raw}"),
            ArgsError::InvalidTeamId { raw } => write!(f, "invalid --team-id value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    session: Session,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn session(&self) -> Session {
        self.session.clone()
    }

    fn calendar(&self) -> Arc<CalendarService> {
        self.services.calendar()
    }

    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn team(&self) -> Arc<TeamService> {
        self.services.team()
    }
}

#[derive(Debug)]
struct Args {
    api_url: Option<String>,
    token: Option<String>,
    user_id: UserId,
    name: String,
    role: Role,
    team_id: Option<TeamId>,
    demo: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--token <token>]");
    eprintln!("                      [--user-id <id>] [--name <name>] [--role <role>]");
    eprintln!("                      [--team-id <id>] [--demo]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", remote::http::DEFAULT_BASE_URL);
    eprintln!("  --user-id 1 --name Learner --role individual");
    eprintln!();
    eprintln!("Roles: individual, team_lead, hr");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LMS_API_URL, LMS_API_TOKEN, LMS_API_TIMEOUT_SECS");
    eprintln!("  LMS_USER_ID, LMS_USER_NAME, LMS_ROLE, LMS_TEAM_ID");
    eprintln!("  LMS_LOG (falls back to RUST_LOG)");
}

fn parse_user_id(raw: String) -> Result<UserId, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidUserId { raw })
}

fn parse_team_id(raw: String) -> Result<Option<TeamId>, ArgsError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ArgsError::InvalidTeamId { raw })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let mut parsed = Self {
            api_url: None,
            token: None,
            user_id: env("LMS_USER_ID")
                .map(parse_user_id)
                .transpose()?
                .unwrap_or_else(|| UserId::new(1)),
            name: env("LMS_USER_NAME").unwrap_or_else(|| "Learner".into()),
            role: env("LMS_ROLE").map_or(Role::Individual, |raw| Role::from_claim(&raw)),
            team_id: env("LMS_TEAM_ID").map(parse_team_id).transpose()?.flatten(),
            demo: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => parsed.api_url = Some(require_value(args, "--api-url")?),
                "--token" => parsed.token = Some(require_value(args, "--token")?),
                "--user-id" => parsed.user_id = parse_user_id(require_value(args, "--user-id")?)?,
                "--name" => parsed.name = require_value(args, "--name")?,
                "--role" => parsed.role = Role::from_claim(&require_value(args, "--role")?),
                "--team-id" => parsed.team_id = parse_team_id(require_value(args, "--team-id")?)?,
                "--demo" => parsed.demo = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn session(&self) -> Session {
        Session::new(self.user_id, self.name.as_str(), self.role, self.team_id)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LMS_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_remote(args: &Args, clock: &Clock) -> Result<Remote, Box<dyn std::error::Error>> {
    if args.demo {
        let repo = InMemoryRepository::new();
        let team = args.team_id.unwrap_or_else(|| TeamId::new(1));
        demo::seed(&repo, args.user_id, team, clock.today())?;
        return Ok(Remote::from_in_memory(repo));
    }

    let mut config = RemoteConfig::from_env()?;
    if let Some(url) = &args.api_url {
        config.base_url = RemoteConfig::new(url)?.base_url;
    }
    if args.token.is_some() {
        config = config.with_token(args.token.clone());
    }
    tracing::info!(base_url = %config.base_url, "using remote backend");
    Ok(Remote::http(config)?)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let clock = Clock::default_clock();
    let remote = build_remote(&args, &clock)?;
    let session = args.session();
    tracing::info!(
        user_id = %session.user_id(),
        role = %session.role(),
        demo = args.demo,
        "starting training calendar"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        session,
        services: AppServices::new(&remote, clock),
    });
    let context = build_app_context(&app);

    // Some window managers default dev builds to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Training Calendar")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
