//! Command-line front end for the family tree.
//!
//! # Responsibility
//! - Map subcommands onto `FamilyService` use-cases.
//! - Print member cards and relation notifications as plain text.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use famtree_core::db::{open_db, DEFAULT_DB_FILE_NAME};
use famtree_core::{
    default_log_level, init_logging, render_card, FamilyService, KvSnapshotRepository, MemberCard,
    MemberId, NewMember, RecordingNotifier, RelationKind, SqliteKeyValueStore,
};
use log::error;
use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "famtree")]
#[command(about = "Family tree viewer and editor", long_about = None)]
#[command(version = famtree_core::core_version())]
struct Cli {
    /// SQLite database holding the family tree snapshot
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a family member
    Add(AddArgs),
    /// Record a relation between two members, e.g. `relate <john> child <jane>`
    Relate {
        member: String,
        kind: RelationKind,
        other: String,
    },
    /// List members, optionally filtered by name
    List(ListArgs),
    /// Show one member with all relations
    Show { member: String },
    /// Remove a member and every relation pointing at it
    Remove { member: String },
}

#[derive(Args)]
struct AddArgs {
    first_name: String,
    last_name: String,

    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    born: Option<NaiveDate>,

    /// Record the new member as this kind of `--of`
    #[arg(long, requires = "of")]
    relation: Option<RelationKind>,

    /// Existing member id the relation refers to
    #[arg(long, requires = "relation")]
    of: Option<String>,
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive substring of "first last"
    #[arg(long, short, default_value = "")]
    query: String,

    /// Member ids whose cards should be expanded
    #[arg(long, short)]
    expand: Vec<String>,

    /// Expand every card
    #[arg(long, conflicts_with = "expand")]
    expand_all: bool,
}

type Service<'conn> =
    FamilyService<KvSnapshotRepository<SqliteKeyValueStore<'conn>>, RecordingNotifier>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&cli.db)?;
    let repo = KvSnapshotRepository::new(SqliteKeyValueStore::new(&conn));
    let mut service = FamilyService::load(repo, RecordingNotifier::new())?;
    let today = Local::now().date_naive();

    match cli.command {
        Command::Add(args) => {
            let mut request = NewMember::new(args.first_name, args.last_name);
            request.birth_date = args.born;
            if let (Some(kind), Some(anchor)) = (args.relation, args.of) {
                request = request.related_to(MemberId::from(anchor), kind);
            }
            let member = service.add_member(request)?;
            println!("added {} [{}]", member.full_name(), member.id);
        }
        Command::Relate {
            member,
            kind,
            other,
        } => {
            service.link_members(&MemberId::from(member), kind, &MemberId::from(other))?;
        }
        Command::List(args) => {
            let expanded: HashSet<MemberId> = if args.expand_all {
                service.members().iter().map(|m| m.id.clone()).collect()
            } else {
                args.expand.into_iter().map(MemberId::from).collect()
            };
            print_cards(&service, args.query.trim(), &expanded, today);
        }
        Command::Show { member } => {
            let id = MemberId::from(member);
            let member = service
                .member(&id)
                .ok_or_else(|| format!("member not found: {id}"))?;
            let card = MemberCard::expanded(member, service.relations(&id)?, today);
            print!("{}", render_card(&card));
        }
        Command::Remove { member } => {
            let removed = service.remove_member(&MemberId::from(member))?;
            println!("removed {} [{}]", removed.full_name(), removed.id);
        }
    }

    for message in service.notifier().drain() {
        println!("{message}");
    }
    Ok(())
}

fn print_cards(service: &Service<'_>, query: &str, expanded: &HashSet<MemberId>, today: NaiveDate) {
    let cards = service.cards(query, expanded, today);
    if cards.is_empty() {
        println!("no family members found");
        return;
    }
    for card in &cards {
        print!("{}", render_card(card));
    }
}
