//! hometrack CLI - collaborative home-transaction journey tracking.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;

use hometrack_core::{
    checklist, steps, CriticalDateRecord, DashboardId, DiligenceTaskRecord, DocumentLinkRecord,
    FixedChecklist, JourneyType, OfferActivityRecord, PropertyRecord, ReceivedOfferRecord,
    RepairRequestRecord, TrackedRecord, UserId, UtilityTransferRecord,
};
use hometrack_estimators::{home_value, net_sheet, piti, HomeValueInput, PitiInput};
use hometrack_identity::{invitation_link, IdentityProvider, StoreBackedIdentity};
use hometrack_session::DashboardSession;
use hometrack_storage::{DocumentStore, JsonStore};

#[derive(Parser)]
#[command(name = "hometrack")]
#[command(about = "Collaborative home-transaction journey tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new agent account and sign in
    Register {
        /// Sign-in email
        email: String,
        /// Display name
        name: String,
        /// Password (6+ characters)
        #[arg(long)]
        password: String,
    },
    /// Accept an invitation: register a client account and join the dashboard
    Join {
        /// Dashboard ID from the invitation link
        dashboard: String,
        /// Sign-in email
        email: String,
        /// Display name
        name: String,
        /// Password (6+ characters)
        #[arg(long)]
        password: String,
    },
    /// Sign in as an existing user
    Login {
        /// Sign-in email
        email: String,
        /// Password
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Create a dashboard and print its invitation link
    Create {
        /// Dashboard title
        title: String,
        /// Journey type: buyer or seller
        #[arg(long)]
        journey: String,
        /// Client display name
        #[arg(long)]
        client_name: String,
        /// Client email for the invitation
        #[arg(long)]
        client_email: String,
        /// Origin for the invitation link
        #[arg(long, default_value = "https://hometrack.example.com")]
        origin: String,
    },
    /// List dashboards you are a member of
    List,
    /// Show one dashboard's checklists and progress
    Show {
        /// Dashboard ID
        dashboard: String,
    },
    /// Toggle a step checklist item
    Toggle {
        /// Dashboard ID
        dashboard: String,
        /// Step number (0-5)
        step: usize,
        /// Item number within the step
        item: usize,
    },
    /// Toggle a final-walkthrough or moving-day item
    ToggleFixed {
        /// Dashboard ID
        dashboard: String,
        /// Which list: walkthrough or moving
        list: String,
        /// Item number
        index: usize,
    },
    /// Set your notes for a journey section
    Note {
        /// Dashboard ID
        dashboard: String,
        /// Section name, e.g. financial or pricing
        section: String,
        /// Note text
        text: String,
        /// Write the agent-side notes instead of the client-side ones
        #[arg(long)]
        agent: bool,
    },
    /// Print the invitation link for a dashboard
    Invite {
        /// Dashboard ID
        dashboard: String,
        /// Origin for the invitation link
        #[arg(long, default_value = "https://hometrack.example.com")]
        origin: String,
    },
    /// Add a tracked record to one of a dashboard's lists
    #[command(subcommand)]
    Record(RecordCommands),
    /// Financial estimators
    #[command(subcommand)]
    Estimate(EstimateCommands),
}

#[derive(Subcommand)]
enum RecordCommands {
    /// Track a property (client list by default)
    Property {
        dashboard: String,
        address: String,
        price: String,
        #[arg(long, default_value = "")]
        beds: String,
        #[arg(long, default_value = "")]
        baths: String,
        #[arg(long, default_value = "")]
        sqft: String,
        #[arg(long, default_value = "")]
        listing_url: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Add to the agent's suggestion list
        #[arg(long)]
        agent: bool,
    },
    /// Buyer offer-tracker row (offer, counter, response)
    Offer {
        dashboard: String,
        date: String,
        kind: String,
        price: String,
        #[arg(long, default_value = "")]
        key_terms: String,
        #[arg(long, default_value = "Submitted")]
        status: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Offer received from a prospective buyer (seller journey)
    ReceivedOffer {
        dashboard: String,
        buyer_name: String,
        offer_price: String,
        #[arg(long, default_value = "")]
        earnest_money: String,
        #[arg(long, default_value = "")]
        closing_date: String,
        #[arg(long, default_value = "")]
        contingencies: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Inspection / due-diligence task
    Diligence {
        dashboard: String,
        task_name: String,
        #[arg(long, default_value = "")]
        scheduled_date: String,
        #[arg(long, default_value = "")]
        vendor_contact: String,
        #[arg(long, default_value = "")]
        report_due_date: String,
        #[arg(long, default_value = "Pending")]
        status: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Repair or credit request
    Repair {
        dashboard: String,
        issue: String,
        #[arg(long, default_value = "")]
        desired_action: String,
        #[arg(long, default_value = "")]
        estimated_cost: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Contract deadline
    CriticalDate {
        dashboard: String,
        description: String,
        due_date: String,
        #[arg(long, default_value = "")]
        responsible_party: String,
        #[arg(long, default_value = "Pending")]
        status: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Document hub link
    Document {
        dashboard: String,
        name: String,
        url: String,
    },
    /// Utility transfer around closing
    Utility {
        dashboard: String,
        kind: String,
        provider: String,
        #[arg(long, default_value = "")]
        account: String,
        #[arg(long, default_value = "")]
        scheduled_date: String,
        #[arg(long, default_value = "")]
        confirmation: String,
        #[arg(long, default_value = "Pending")]
        status: String,
    },
}

#[derive(Subcommand)]
enum EstimateCommands {
    /// Estimated monthly payment (principal, interest, tax, insurance)
    Piti {
        #[arg(long)]
        home_price: f64,
        #[arg(long, default_value = "0")]
        down_payment: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        /// Loan term in years
        #[arg(long, default_value = "30")]
        term: u32,
        #[arg(long, default_value = "0")]
        annual_tax: f64,
        #[arg(long, default_value = "0")]
        annual_insurance: f64,
    },
    /// Estimated cash to close
    NetSheet {
        #[arg(long)]
        offer_price: f64,
        #[arg(long)]
        loan_amount: f64,
        #[arg(long, default_value = "3")]
        closing_costs_pct: f64,
    },
    /// Naive home-value estimate
    Value {
        #[arg(long)]
        sqft: f64,
        #[arg(long, default_value = "0")]
        beds: u32,
        #[arg(long, default_value = "0")]
        baths: f64,
        #[arg(long)]
        year: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let root = PathBuf::from(".hometrack");
    let store = Arc::new(Mutex::new(JsonStore::new(&root).await?));
    let mut identity = StoreBackedIdentity::new(store.clone());

    match cli.command {
        Commands::Register {
            email,
            name,
            password,
        } => {
            let user = identity.register_agent(&email, &password, &name).await?;
            save_cli_session(&root, user.id)?;
            println!("Registered agent {} <{}>", user.name, user.email);
        }
        Commands::Join {
            dashboard,
            email,
            name,
            password,
        } => {
            let dashboard_id = parse_dashboard_id(&dashboard)?;
            let user = identity
                .register_client(&email, &password, &name, Some(dashboard_id))
                .await?;
            save_cli_session(&root, user.id)?;
            println!("Welcome {}! You have joined dashboard {}.", user.name, dashboard_id);
        }
        Commands::Login { email, password } => {
            let user = identity.sign_in(&email, &password).await?;
            save_cli_session(&root, user.id)?;
            println!("Signed in as {} ({})", user.name, user.role);
        }
        Commands::Logout => {
            identity.sign_out();
            clear_cli_session(&root)?;
            println!("Signed out");
        }
        Commands::Create {
            title,
            journey,
            client_name,
            client_email,
            origin,
        } => {
            let user = require_user(&root, &mut identity).await?;
            let journey: JourneyType = journey.parse()?;
            let session = DashboardSession::create(
                store.clone(),
                user,
                &title,
                journey,
                &client_name,
                &client_email,
            )
            .await?;

            let id = session.snapshot().id;
            let link = invitation_link(&origin, id, Some(&client_email))?;
            println!("Created {journey} dashboard {id}");
            println!("Send this invitation link to {client_name}: {link}");
        }
        Commands::List => {
            let user = require_user(&root, &mut identity).await?;
            let dashboards = store.lock().await.list_dashboards_for(user).await?;

            println!("Dashboards ({})", dashboards.len());
            for dashboard in dashboards {
                println!(
                    "  {} | {:>3}% | {} | {} ({})",
                    dashboard.id,
                    dashboard.progress,
                    dashboard.journey,
                    dashboard.title,
                    dashboard.client_name,
                );
            }
        }
        Commands::Show { dashboard } => {
            let user = require_user(&root, &mut identity).await?;
            let session = open_session(&store, &dashboard, user).await?;
            print_dashboard(&session);
        }
        Commands::Toggle {
            dashboard,
            step,
            item,
        } => {
            let user = require_user(&root, &mut identity).await?;
            let mut session = open_session(&store, &dashboard, user).await?;
            let labels = checklist(session.snapshot().journey, step);
            let label = labels
                .get(item)
                .ok_or_else(|| anyhow!("no item {item} in step {step}"))?;

            let checked = session.toggle_checklist_item(step, item);
            session.flush().await?;
            println!(
                "[{}] {label} - overall progress {}%",
                if checked { "x" } else { " " },
                session.progress(),
            );
        }
        Commands::ToggleFixed {
            dashboard,
            list,
            index,
        } => {
            let user = require_user(&root, &mut identity).await?;
            let mut session = open_session(&store, &dashboard, user).await?;
            let list = match list.as_str() {
                "walkthrough" => FixedChecklist::FinalWalkthrough,
                "moving" => FixedChecklist::MovingDay,
                other => return Err(anyhow!("unknown list '{other}' (walkthrough or moving)")),
            };
            session.toggle_fixed_item(list, index);
            session.flush().await?;
            println!("Toggled item {index}");
        }
        Commands::Note {
            dashboard,
            section,
            text,
            agent,
        } => {
            let user = require_user(&root, &mut identity).await?;
            let mut session = open_session(&store, &dashboard, user).await?;
            if agent {
                session.set_agent_notes(&section, text);
            } else {
                session.set_client_notes(&section, text);
            }
            session.flush().await?;
            println!("Saved {} notes for '{section}'", if agent { "agent" } else { "client" });
        }
        Commands::Invite { dashboard, origin } => {
            let user = require_user(&root, &mut identity).await?;
            let session = open_session(&store, &dashboard, user).await?;
            let snapshot = session.snapshot();
            let email = snapshot.client_email.clone();
            let link = invitation_link(
                &origin,
                snapshot.id,
                (!email.is_empty()).then_some(email.as_str()),
            )?;
            println!("{link}");
        }
        Commands::Record(record) => {
            let user = require_user(&root, &mut identity).await?;
            add_record(&store, user, record).await?;
        }
        Commands::Estimate(estimate) => run_estimate(estimate),
    }

    Ok(())
}

async fn add_record(
    store: &Arc<Mutex<JsonStore>>,
    user: UserId,
    command: RecordCommands,
) -> Result<()> {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let (dashboard, record) = match command {
        RecordCommands::Property {
            dashboard,
            address,
            price,
            beds,
            baths,
            sqft,
            listing_url,
            notes,
            agent,
        } => {
            let property = PropertyRecord {
                address,
                price,
                beds,
                baths,
                sqft,
                listing_url,
                notes,
                ..Default::default()
            };
            let record = if agent {
                TrackedRecord::AgentProperty(property)
            } else {
                TrackedRecord::ClientProperty(property)
            };
            (dashboard, record)
        }
        RecordCommands::Offer {
            dashboard,
            date,
            kind,
            price,
            key_terms,
            status,
            notes,
        } => (
            dashboard,
            TrackedRecord::OfferActivity(OfferActivityRecord {
                date,
                kind,
                price,
                key_terms,
                status,
                notes,
                ..Default::default()
            }),
        ),
        RecordCommands::ReceivedOffer {
            dashboard,
            buyer_name,
            offer_price,
            earnest_money,
            closing_date,
            contingencies,
            notes,
        } => (
            dashboard,
            TrackedRecord::ReceivedOffer(ReceivedOfferRecord {
                buyer_name,
                offer_price,
                earnest_money,
                closing_date,
                contingencies,
                status: "Received".to_string(),
                notes,
                received_date: today,
                ..Default::default()
            }),
        ),
        RecordCommands::Diligence {
            dashboard,
            task_name,
            scheduled_date,
            vendor_contact,
            report_due_date,
            status,
            notes,
        } => (
            dashboard,
            TrackedRecord::DiligenceTask(DiligenceTaskRecord {
                task_name,
                scheduled_date,
                vendor_contact,
                report_due_date,
                status,
                notes,
                ..Default::default()
            }),
        ),
        RecordCommands::Repair {
            dashboard,
            issue,
            desired_action,
            estimated_cost,
            notes,
        } => (
            dashboard,
            TrackedRecord::RepairRequest(RepairRequestRecord {
                issue_description: issue,
                desired_action,
                estimated_cost,
                notes,
                ..Default::default()
            }),
        ),
        RecordCommands::CriticalDate {
            dashboard,
            description,
            due_date,
            responsible_party,
            status,
            notes,
        } => (
            dashboard,
            TrackedRecord::CriticalDate(CriticalDateRecord {
                description,
                due_date,
                responsible_party,
                status,
                notes,
                ..Default::default()
            }),
        ),
        RecordCommands::Document {
            dashboard,
            name,
            url,
        } => (
            dashboard,
            TrackedRecord::DocumentLink(DocumentLinkRecord {
                document_name: name,
                url,
                uploaded_by: user.to_string(),
                date_added: today,
                ..Default::default()
            }),
        ),
        RecordCommands::Utility {
            dashboard,
            kind,
            provider,
            account,
            scheduled_date,
            confirmation,
            status,
        } => (
            dashboard,
            TrackedRecord::UtilityTransfer(UtilityTransferRecord {
                kind,
                provider,
                account,
                scheduled_date,
                confirmation,
                status,
                ..Default::default()
            }),
        ),
    };

    let list = record.list_kind();
    let mut session = open_session(store, &dashboard, user).await?;
    let id = session.add_record(record);
    session.flush().await?;
    println!("Added {} record {id}", list.as_str());
    Ok(())
}

fn run_estimate(command: EstimateCommands) {
    match command {
        EstimateCommands::Piti {
            home_price,
            down_payment,
            rate,
            term,
            annual_tax,
            annual_insurance,
        } => {
            let breakdown = piti(&PitiInput {
                home_price,
                down_payment,
                annual_rate_pct: rate,
                term_years: term,
                annual_tax,
                annual_insurance,
            });
            println!("Loan amount:           ${:>12.2}", breakdown.loan_amount);
            println!("Principal & interest:  ${:>12.2}", breakdown.principal_and_interest);
            println!("Monthly property tax:  ${:>12.2}", breakdown.monthly_tax);
            println!("Monthly insurance:     ${:>12.2}", breakdown.monthly_insurance);
            println!("Total estimated PITI:  ${:>12.2}", breakdown.total);
        }
        EstimateCommands::NetSheet {
            offer_price,
            loan_amount,
            closing_costs_pct,
        } => match net_sheet(offer_price, loan_amount, closing_costs_pct) {
            Some(sheet) => {
                println!("Closing costs ({closing_costs_pct}%): ${:.2}", sheet.closing_costs);
                println!("Estimated cash to close: ${:.2}", sheet.cash_to_close);
            }
            None => println!("Not computable - enter a positive offer price."),
        },
        EstimateCommands::Value {
            sqft,
            beds,
            baths,
            year,
        } => match home_value(&HomeValueInput {
            square_footage: sqft,
            bedrooms: beds,
            bathrooms: baths,
            year_built: year,
        }) {
            Some(estimate) => {
                println!("Estimated market value: ${:.0}", estimate.estimate);
                println!(
                    "Estimated range: ${:.0} - ${:.0}",
                    estimate.low, estimate.high
                );
                println!("This is a basic estimate. Professional CMA recommended for accurate pricing.");
            }
            None => println!("Not computable - enter a positive square footage."),
        },
    }
}

async fn open_session(
    store: &Arc<Mutex<JsonStore>>,
    dashboard: &str,
    user: UserId,
) -> Result<DashboardSession<JsonStore>> {
    let dashboard_id = parse_dashboard_id(dashboard)?;
    DashboardSession::open(store.clone(), dashboard_id, user).await
}

fn print_dashboard(session: &DashboardSession<JsonStore>) {
    let snapshot = session.snapshot();
    println!("{} ({} journey, {:?})", snapshot.title, snapshot.journey, snapshot.status);
    println!("Client: {} <{}>", snapshot.client_name, snapshot.client_email);
    println!("Progress: {}%", snapshot.progress);
    println!();

    for step in steps(snapshot.journey) {
        let complete = session.completed_steps().contains(&step.id);
        println!("{} {}", if complete { "✓" } else { " " }, step.title);
        for (index, label) in checklist(snapshot.journey, step.id).iter().enumerate() {
            let checked = snapshot.progress_data.checked_items.is_checked(step.id, index);
            println!("    [{}] {label}", if checked { "x" } else { " " });
        }
    }

    let counts = [
        ("properties (client)", snapshot.client_properties.len()),
        ("properties (agent)", snapshot.agent_properties.len()),
        ("offer activity", snapshot.offer_track_items.len()),
        ("diligence tasks", snapshot.diligence_tasks.len()),
        ("repair requests", snapshot.repair_request_items.len()),
        ("critical dates", snapshot.critical_dates.len()),
        ("documents", snapshot.document_hub_links.len()),
        ("utilities", snapshot.utility_transfer_items.len()),
        ("received offers", snapshot.offers.len()),
    ];
    let tracked: Vec<String> = counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(name, n)| format!("{n} {name}"))
        .collect();
    if !tracked.is_empty() {
        println!();
        println!("Tracked: {}", tracked.join(", "));
    }
}

fn parse_dashboard_id(s: &str) -> Result<DashboardId> {
    s.parse().map_err(|_| anyhow!("Invalid dashboard ID"))
}

// === CLI session file ===
//
// The identity provider's session is in-memory; across CLI invocations the
// signed-in user is remembered in `.hometrack/session.json`.

#[derive(serde::Serialize, serde::Deserialize)]
struct CliSession {
    user_id: UserId,
}

fn session_path(root: &std::path::Path) -> PathBuf {
    root.join("session.json")
}

fn save_cli_session(root: &std::path::Path, user_id: UserId) -> Result<()> {
    let json = serde_json::to_string_pretty(&CliSession { user_id })?;
    std::fs::write(session_path(root), json)?;
    Ok(())
}

fn clear_cli_session(root: &std::path::Path) -> Result<()> {
    match std::fs::remove_file(session_path(root)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

async fn require_user(
    root: &std::path::Path,
    identity: &mut StoreBackedIdentity<JsonStore>,
) -> Result<UserId> {
    if let Some(user) = identity.current_user() {
        return Ok(user);
    }
    let json = std::fs::read_to_string(session_path(root))
        .map_err(|_| anyhow!("Not signed in - run `hometrack login` first"))?;
    let session: CliSession = serde_json::from_str(&json)?;
    let user = identity.restore_session(session.user_id).await?;
    Ok(user.id)
}
