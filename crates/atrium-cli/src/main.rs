//! Atrium CLI - project dashboard frontend.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ATRIUM_*`)
//! 3. Global config (`~/.atrium/config.toml`)
//! 4. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `ATRIUM_API_URL`: API base URL
//! - `ATRIUM_TOKEN`: bearer token
//! - `ATRIUM_USER_ID` / `ATRIUM_USER_NAME` / `ATRIUM_USER_EMAIL`: identity
//! - `ATRIUM_STATE_DIR`: where the persisted selection lives
//! - `ATRIUM_DEBUG`: enable debug logging (`true`/`false`)

use anyhow::{bail, Result};
use atrium_app::settings::{DeleteProjectDialog, InviteDialog, MembershipPanel, SettingsScreen};
use atrium_app::{
    active_tab, cap_notice, ApiClient, AppConfig, AppError, ConfigLoader, GateOutcome, Identity,
    Industry,
    ModelType, NavigationShell, NewProject, PermissionGate, PermissionLevel, PermissionResolver,
    Project, ProjectApi, ProjectDescription, ProjectFunction, ProjectId, ProjectName,
    ProjectProvider, ProjectSelector, SelectionStore, SelectorOutcome, StaticToken, TryNew,
    UseCase, UserId,
};
use clap::{Parser, Subcommand};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Atrium CLI - project dashboard frontend
#[derive(Parser, Debug)]
#[command(name = "atrium")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Custom global config path (default: ~/.atrium/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// API base URL (also: ATRIUM_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Bearer token (also: ATRIUM_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// State directory for the persisted selection (also: ATRIUM_STATE_DIR)
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List, create, select and delete projects
    #[command(subcommand)]
    Projects(ProjectsCmd),

    /// Inspect and manage the selected project's members
    #[command(subcommand)]
    Members(MembersCmd),

    /// Show or update the selected project's settings
    #[command(subcommand)]
    Settings(SettingsCmd),

    /// Print the navigation tabs for the selected project
    Nav {
        /// Highlight the tab active at this route path
        #[arg(long, value_name = "PATH")]
        route: Option<String>,
    },

    /// Print the signed-in identity and register it with the backend
    Whoami,
}

#[derive(Subcommand, Debug)]
enum ProjectsCmd {
    /// List every project on the account
    List,

    /// Create a project and make it the active selection
    Create {
        /// Project name (max 25 characters)
        #[arg(long)]
        name: String,

        /// Project description (max 100 characters)
        #[arg(long)]
        description: String,

        /// Industry: education or entrepreneurial
        #[arg(long, value_parser = parse_industry)]
        industry: Industry,

        /// Use case: research, teaching, production or licensing
        #[arg(long, value_parser = parse_use_case)]
        use_case: UseCase,

        /// Model type: gpt-4o-mini or gpt-4o
        #[arg(long, value_parser = parse_model_type)]
        model_type: ModelType,

        /// Function: search-and-chat or application-ai
        #[arg(long, value_parser = parse_function)]
        function: ProjectFunction,
    },

    /// Make a project the active selection
    Select {
        /// Project id
        id: String,
    },

    /// Delete the selected project (Owner only; interactive confirmation)
    Delete,
}

#[derive(Subcommand, Debug)]
enum MembersCmd {
    /// List the selected project's members
    List,

    /// Invite an email address with a role
    Invite {
        /// Email address to invite
        email: String,

        /// Role to grant: editor or viewer
        #[arg(long, value_parser = parse_level, default_value = "viewer")]
        level: PermissionLevel,
    },

    /// Change a member's role
    SetPermission {
        /// Member user id
        member: String,

        /// New role: editor or viewer
        #[arg(long, value_parser = parse_level)]
        level: PermissionLevel,
    },

    /// Remove a member from the project (Owner only)
    Remove {
        /// Member user id
        member: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCmd {
    /// Print the selected project's settings
    Show,

    /// Update editable settings fields
    Update {
        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New industry: education or entrepreneurial
        #[arg(long, value_parser = parse_industry)]
        industry: Option<Industry>,

        /// New use case: research, teaching, production or licensing
        #[arg(long, value_parser = parse_use_case)]
        use_case: Option<UseCase>,

        /// New model type: gpt-4o-mini or gpt-4o
        #[arg(long, value_parser = parse_model_type)]
        model_type: Option<ModelType>,
    },
}

fn parse_industry(s: &str) -> Result<Industry, String> {
    match s.to_lowercase().as_str() {
        "education" => Ok(Industry::Education),
        "entrepreneurial" => Ok(Industry::Entrepreneurial),
        _ => Err(format!("unknown industry '{s}' (education, entrepreneurial)")),
    }
}

fn parse_use_case(s: &str) -> Result<UseCase, String> {
    match s.to_lowercase().as_str() {
        "research" => Ok(UseCase::Research),
        "teaching" => Ok(UseCase::Teaching),
        "production" => Ok(UseCase::Production),
        "licensing" => Ok(UseCase::Licensing),
        _ => Err(format!(
            "unknown use case '{s}' (research, teaching, production, licensing)"
        )),
    }
}

fn parse_model_type(s: &str) -> Result<ModelType, String> {
    match s.to_lowercase().as_str() {
        "gpt-4o-mini" | "openai-gpt-4o-mini" => Ok(ModelType::Gpt4oMini),
        "gpt-4o" | "openai-gpt-4o" => Ok(ModelType::Gpt4o),
        _ => Err(format!("unknown model type '{s}' (gpt-4o-mini, gpt-4o)")),
    }
}

fn parse_function(s: &str) -> Result<ProjectFunction, String> {
    match s.to_lowercase().as_str() {
        "search-and-chat" => Ok(ProjectFunction::SearchAndChat),
        "application-ai" => Ok(ProjectFunction::ApplicationAi),
        _ => Err(format!(
            "unknown function '{s}' (search-and-chat, application-ai)"
        )),
    }
}

fn parse_level(s: &str) -> Result<PermissionLevel, String> {
    match s.to_lowercase().as_str() {
        "owner" => Ok(PermissionLevel::Owner),
        "editor" => Ok(PermissionLevel::Editor),
        "viewer" => Ok(PermissionLevel::Viewer),
        _ => Err(format!("unknown role '{s}' (editor, viewer)")),
    }
}

/// Loads config and applies CLI argument overrides as the
/// highest-priority layer.
fn resolve_config(args: &Args) -> Result<AppConfig, AppError> {
    let mut loader = ConfigLoader::new();
    if let Some(ref path) = args.config {
        loader = loader.with_global_config(path);
    }
    let mut config = loader.load()?;

    if args.debug {
        config.debug = true;
    }
    if let Some(ref url) = args.api_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(ref token) = args.token {
        config.auth.token = Some(token.clone());
    }
    if let Some(ref dir) = args.state_dir {
        config.paths.state_dir = Some(dir.clone());
    }
    Ok(config)
}

/// The assembled application: config, API client, selection store and
/// the live selection slot.
struct App {
    config: AppConfig,
    api: Arc<dyn ProjectApi>,
    store: SelectionStore,
    provider: ProjectProvider,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, AppError> {
        let tokens: Arc<dyn atrium_app::TokenProvider> = match config.auth.token.as_deref() {
            Some(token) => Arc::new(StaticToken::new(token)),
            None => Arc::new(StaticToken::signed_out()),
        };
        let api = Arc::new(ApiClient::new(&config.api.base_url, tokens));
        let store = SelectionStore::new(config.state_dir())?;
        Ok(Self {
            config,
            api,
            store,
            provider: ProjectProvider::new(),
        })
    }

    fn resolver(&self) -> PermissionResolver {
        PermissionResolver::new(self.api.clone())
    }

    fn identity(&self) -> Result<Identity, AppError> {
        Identity::from_config(&self.config).ok_or(AppError::MissingIdentity)
    }

    /// Restores the persisted selection into the context and returns
    /// the project's full detail.
    async fn selected_project(&self) -> Result<Project, AppError> {
        let id = self.store.load().await?.ok_or(AppError::NoSelection)?;
        let project = self.api.project_detail(&id).await?;
        self.provider.handle().set_selected(project.clone());
        Ok(project)
    }

    /// Strict manager/owner gate for commands that mutate a project.
    async fn require(&self, gate: &PermissionGate, project: &ProjectId) -> Result<()> {
        let resolver = self.resolver();
        match gate.check(Some(project), &resolver).await {
            GateOutcome::Render => Ok(()),
            GateOutcome::Redirect(_) => bail!("your role does not permit this operation"),
            GateOutcome::Hide | GateOutcome::Loading => {
                bail!("could not verify your permission for this project")
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let filter = if config.debug {
        EnvFilter::new("debug,hyper=warn,reqwest=warn,rustls=warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();
    debug!(
        api_url = %config.api.base_url,
        state_dir = %config.state_dir().display(),
        "configuration resolved"
    );

    let app = App::new(config)?;

    match args.command {
        Command::Projects(cmd) => run_projects(&app, cmd).await,
        Command::Members(cmd) => run_members(&app, cmd).await,
        Command::Settings(cmd) => run_settings(&app, cmd).await,
        Command::Nav { route } => run_nav(&app, route.as_deref()).await,
        Command::Whoami => run_whoami(&app).await,
    }
}

async fn run_projects(app: &App, cmd: ProjectsCmd) -> Result<()> {
    let mut selector = ProjectSelector::new(
        app.api.clone(),
        app.store.clone(),
        app.provider.handle(),
    );

    match cmd {
        ProjectsCmd::List => {
            if selector.initialize().await == SelectorOutcome::OpenCreateModal {
                println!("No projects. Create one with `atrium projects create`.");
                return Ok(());
            }
            let selected = app.provider.handle().selected_id();
            for project in selector.projects() {
                let marker = if Some(&project.id) == selected.as_ref() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {}  {}", project.id, project.name);
            }
            if !selector.can_create() {
                println!("{}", cap_notice());
            }
        }
        ProjectsCmd::Create {
            name,
            description,
            industry,
            use_case,
            model_type,
            function,
        } => {
            selector.initialize().await;
            let new = NewProject {
                name: ProjectName::try_new(name)?,
                description: ProjectDescription::try_new(description)?,
                industry,
                use_case,
                model_type,
                function,
            };
            let project = selector.create(new).await?;
            println!("Created and selected {}  {}", project.id, project.name);
        }
        ProjectsCmd::Select { id } => {
            if selector.initialize().await == SelectorOutcome::OpenCreateModal {
                bail!("no projects on this account");
            }
            let id = ProjectId::new(id);
            match selector.select(&id).await {
                Some(project) => println!("Selected {}  {}", project.id, project.name),
                None => bail!("project '{id}' is not in your project list"),
            }
        }
        ProjectsCmd::Delete => {
            let project = app.selected_project().await?;
            app.require(&PermissionGate::owner_only(), &project.id).await?;

            let dialog = DeleteProjectDialog::open(&project);
            println!("Deleting '{}'. This cannot be undone.", project.name);
            println!("Confirmation code: {}", dialog.code());
            let typed_name = prompt("Type the project name: ")?;
            let typed_code = prompt("Type the confirmation code: ")?;
            let confirmed = prompt("Proceed? (yes/no): ")? == "yes";
            dialog
                .execute(app.api.as_ref(), &typed_name, &typed_code, confirmed)
                .await?;
            app.store.clear().await?;
            app.provider.handle().clear();
            println!("Project deleted.");
        }
    }
    Ok(())
}

async fn run_members(app: &App, cmd: MembersCmd) -> Result<()> {
    let project = app.selected_project().await?;
    app.require(&PermissionGate::managers(), &project.id).await?;
    let identity = app.identity()?;

    let mut panel =
        MembershipPanel::load(app.api.clone(), project.id.clone(), identity.user_id).await?;

    match cmd {
        MembersCmd::List => {
            for member in panel.members() {
                println!(
                    "{}  {}  <{}>  {}",
                    member.id,
                    member.name,
                    member.email,
                    member.permission_label()
                );
            }
        }
        MembersCmd::Invite { email, level } => {
            let dialog =
                InviteDialog::new(app.api.clone(), project.id, panel.caller_permission());
            let notice = dialog.invite(&email, level).await?;
            println!("{}", notice.message());
        }
        MembersCmd::SetPermission { member, level } => {
            let member = UserId::new(member);
            panel.change_permission(&member, level).await?;
            println!("Updated {member} to {}.", level.label());
        }
        MembersCmd::Remove { member, yes } => {
            let member = UserId::new(member);
            let confirmed =
                yes || prompt(&format!("Remove {member} from the project? (yes/no): "))? == "yes";
            panel.remove(&member, confirmed).await?;
            println!("Removed {member}.");
        }
    }
    Ok(())
}

async fn run_settings(app: &App, cmd: SettingsCmd) -> Result<()> {
    let project = app.selected_project().await?;
    app.require(&PermissionGate::managers(), &project.id).await?;

    let mut screen = SettingsScreen::load(app.api.clone(), &project.id).await?;
    match cmd {
        SettingsCmd::Show => {
            let project = screen.project();
            println!("id:          {}", project.id);
            println!("name:        {}", project.name);
            println!(
                "description: {}",
                project.description.as_deref().unwrap_or("-")
            );
            println!("industry:    {:?}", project.industry);
            println!("use case:    {:?}", project.use_case);
            println!("model type:  {:?}", project.model_type);
            println!(
                "function:    {}",
                project
                    .function
                    .map_or_else(|| "-".to_string(), |f| f.to_string())
            );
        }
        SettingsCmd::Update {
            description,
            industry,
            use_case,
            model_type,
        } => {
            if let Some(description) = description {
                screen.set_description(description);
            }
            if let Some(industry) = industry {
                screen.set_industry(industry);
            }
            if let Some(use_case) = use_case {
                screen.set_use_case(use_case);
            }
            if let Some(model_type) = model_type {
                screen.set_model_type(model_type);
            }
            if !screen.is_changed() {
                bail!("nothing to update");
            }
            screen.save().await?;
            println!("Settings saved.");
        }
    }
    Ok(())
}

async fn run_nav(app: &App, route: Option<&str>) -> Result<()> {
    app.selected_project().await?;
    let shell = NavigationShell::new(app.provider.handle(), app.api.clone(), app.resolver());
    let Some(tabs) = shell.tabs().await else {
        bail!("navigation unavailable: project detail or function missing");
    };
    let active = route.and_then(active_tab);
    for tab in tabs {
        let marker = if Some(tab) == active { "*" } else { " " };
        println!("{marker} {:<14} {}", tab.label(), tab.route());
    }
    Ok(())
}

async fn run_whoami(app: &App) -> Result<()> {
    let identity = app.identity()?;
    identity.ensure_registered(app.api.as_ref()).await?;
    println!("{}  {}  <{}>", identity.user_id, identity.name, identity.email);
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_parsers_accept_known_values() {
        assert_eq!(parse_industry("Education").unwrap(), Industry::Education);
        assert_eq!(parse_use_case("licensing").unwrap(), UseCase::Licensing);
        assert_eq!(parse_model_type("gpt-4o").unwrap(), ModelType::Gpt4o);
        assert_eq!(
            parse_function("search-and-chat").unwrap(),
            ProjectFunction::SearchAndChat
        );
        assert_eq!(parse_level("editor").unwrap(), PermissionLevel::Editor);
    }

    #[test]
    fn enum_parsers_reject_unknown_values() {
        assert!(parse_industry("finance").is_err());
        assert!(parse_use_case("gaming").is_err());
        assert!(parse_model_type("gpt-5").is_err());
        assert!(parse_function("website").is_err());
        assert!(parse_level("superadmin").is_err());
    }

    #[test]
    fn args_parse_create() {
        let args = Args::parse_from([
            "atrium",
            "projects",
            "create",
            "--name",
            "Atlas",
            "--description",
            "Course search",
            "--industry",
            "education",
            "--use-case",
            "teaching",
            "--model-type",
            "gpt-4o-mini",
            "--function",
            "search-and-chat",
        ]);
        match args.command {
            Command::Projects(ProjectsCmd::Create { name, function, .. }) => {
                assert_eq!(name, "Atlas");
                assert_eq!(function, ProjectFunction::SearchAndChat);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_overrides_win_over_defaults() {
        let args = Args::parse_from([
            "atrium",
            "--debug",
            "--config",
            "/nonexistent/config.toml",
            "--api-url",
            "https://api.example.com",
            "--token",
            "tok",
            "nav",
        ]);
        let config = resolve_config(&args).unwrap();
        assert!(config.debug);
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.auth.token.as_deref(), Some("tok"));
    }
}
