//! Command line surface: argument parsing and dispatch to services.

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::order::{OrderDocument, OrderStatus};
use crate::domain::types::VisitDay;
use crate::forms::auth::LoginForm;
use crate::forms::client::ClientForm;
use crate::forms::import::ClientImportForm;
use crate::forms::order::{OrderForm, OrderItemForm};
use crate::forms::payment::PaymentForm;
use crate::forms::product::ProductForm;
use crate::models::config::ClientConfig;
use crate::repository::ApiRepository;
use crate::schedule::Calendar;
use crate::services::{ServiceError, ServiceResult, auth, clients, dashboard, orders, products};
use crate::session::TokenStore;

pub mod render;

#[derive(Parser, Debug)]
#[command(name = "rutero", version, about = "Daily visit routes, clients, products and orders")]
pub struct Cli {
    /// Directory holding `default.yaml` and per-environment overrides.
    #[arg(long, env = "RUTERO_CONFIG_DIR", default_value = "config", global = true)]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RUTERO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Today's route, tomorrow's plan and clients overdue for a visit
    Dashboard,
    /// Edit today's route
    Route {
        #[command(subcommand)]
        command: RouteCommand,
    },
    /// Manage clients
    Clients {
        #[command(subcommand)]
        command: ClientsCommand,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RouteCommand {
    /// Add a client to today's route
    Add { client_id: String },
    /// Remove a client from today's route
    Remove { client_id: String },
    /// Mark a client on today's route as visited
    Visit { client_id: String },
}

#[derive(Args, Debug, Default)]
pub struct ClientFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Visit day (lunes … domingo); repeat for several days
    #[arg(long = "day")]
    pub days: Vec<VisitDay>,
}

#[derive(Subcommand, Debug)]
pub enum ClientsCommand {
    List {
        /// Only clients that accept orders
        #[arg(long)]
        active: bool,
    },
    Add {
        #[command(flatten)]
        fields: ClientFields,
    },
    /// Change the given fields; `--day` replaces the schedule, `--toggle-day` flips one day
    Edit {
        id: String,
        #[command(flatten)]
        fields: ClientFields,
        #[arg(long = "toggle-day")]
        toggle_days: Vec<VisitDay>,
    },
    Delete {
        id: String,
    },
    /// Create clients from a CSV file with `nombre,telefono,direccion,dias` columns
    Import {
        path: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub wholesale_price: Option<f64>,
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    List,
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    Edit {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
        /// Remove the wholesale price
        #[arg(long, conflicts_with = "wholesale_price")]
        no_wholesale: bool,
    },
    Delete {
        id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StatusArg {
    #[value(name = "pendiente")]
    Pending,
    #[value(name = "completado")]
    Completed,
    #[value(name = "cancelado")]
    Cancelled,
}

impl From<StatusArg> for OrderStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => OrderStatus::Pending,
            StatusArg::Completed => OrderStatus::Completed,
            StatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    Show {
        id: String,
    },
    /// Place an order; items are `PRODUCT_ID:QTY` or `PRODUCT_ID:QTY:mayoreo`
    Create {
        #[arg(long)]
        client: String,
        #[arg(long = "item", required = true, value_parser = parse_item)]
        items: Vec<OrderItemForm>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Complete {
        id: String,
    },
    Cancel {
        id: String,
    },
    /// Register a partial payment
    Pay {
        id: String,
        amount: f64,
    },
    /// Save the invoice PDF
    Invoice {
        id: String,
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Save the work order PDF
    WorkOrder {
        id: String,
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
}

/// Parses `PRODUCT_ID:QTY[:mayoreo]`.
pub fn parse_item(value: &str) -> Result<OrderItemForm, String> {
    let mut parts = value.split(':').map(str::trim);
    let product_id = parts
        .next()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| format!("missing product id in `{value}`"))?;
    let quantity = match parts.next() {
        Some(q) => q
            .parse::<u32>()
            .map_err(|_| format!("invalid quantity in `{value}`"))?,
        None => 1,
    };
    let wholesale = match parts.next() {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case("mayoreo") || flag.eq_ignore_ascii_case("m") => {
            true
        }
        Some(flag) => return Err(format!("unknown price type `{flag}`")),
    };
    if parts.next().is_some() {
        return Err(format!("too many fields in `{value}`"));
    }
    Ok(OrderItemForm {
        product_id: product_id.to_string(),
        quantity,
        wholesale,
    })
}

fn apply_client_fields(form: &mut ClientForm, fields: ClientFields) {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(phone) = fields.phone {
        form.phone = phone;
    }
    if let Some(address) = fields.address {
        form.address = address;
    }
    if !fields.days.is_empty() {
        form.visit_days = fields.days.iter().map(|d| d.as_str().to_string()).collect();
    }
}

fn apply_product_fields(form: &mut ProductForm, fields: ProductFields) {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    if let Some(price) = fields.price {
        form.price = price;
    }
    if fields.wholesale_price.is_some() {
        form.wholesale_price = fields.wholesale_price;
    }
    if let Some(image) = fields.image {
        form.image = image;
    }
}

fn save_document(
    repo: &ApiRepository,
    id: &str,
    kind: OrderDocument,
    output: PathBuf,
) -> ServiceResult<()> {
    let (file_name, bytes) = orders::download_document(repo, id, kind)?;
    let path = output.join(file_name);
    fs::write(&path, bytes).map_err(|source| {
        log::error!("Failed to write {}: {source}", path.display());
        ServiceError::Io {
            path: path.display().to_string(),
            source,
        }
    })?;
    println!("{}", path.display());
    Ok(())
}

/// Executes a parsed command against the configured backend.
pub fn run(command: Command, config: &ClientConfig) -> ServiceResult<()> {
    let repo = ApiRepository::new(
        &config.api_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let store = TokenStore::new(&config.token_file);
    let now = Utc::now().timestamp();

    let command = match command {
        Command::Login { email, password } => {
            let user = auth::login(&repo, &store, LoginForm { email, password })?;
            println!("Sesión iniciada ({})", user.id);
            return Ok(());
        }
        Command::Logout => {
            auth::logout(&store)?;
            println!("Sesión cerrada");
            return Ok(());
        }
        other => other,
    };

    let user = auth::require_session(&repo, &store, now)?;
    let repo = repo.with_token(user.token.as_str());

    match command {
        Command::Login { .. } | Command::Logout => {}
        Command::Whoami => println!("{}", render::user(&user)),
        Command::Dashboard => {
            let data =
                dashboard::load_dashboard(&repo, &Calendar::local(), config.alert_threshold_days)?;
            print!("{}", render::dashboard(&data));
        }
        Command::Route { command } => {
            let route = match command {
                RouteCommand::Add { client_id } => {
                    dashboard::add_to_today_route(&repo, &Calendar::local(), &client_id)?
                }
                RouteCommand::Remove { client_id } => {
                    dashboard::remove_from_today_route(&repo, &client_id)?
                }
                RouteCommand::Visit { client_id } => dashboard::mark_visited(&repo, &client_id)?,
            };
            println!(
                "Ruta de hoy: {} clientes, {} visitados",
                route.stops.len(),
                route.visited_count()
            );
        }
        Command::Clients { command } => match command {
            ClientsCommand::List { active } => {
                print!("{}", render::clients(&clients::list_clients(&repo, active)?));
            }
            ClientsCommand::Add { fields } => {
                let mut form = ClientForm::default();
                apply_client_fields(&mut form, fields);
                let client = clients::save_client(&repo, None, form)?;
                println!("Cliente creado: {} ({})", client.name, client.id);
            }
            ClientsCommand::Edit {
                id,
                fields,
                toggle_days,
            } => {
                let existing = clients::get_client(&repo, &id)?;
                let mut form = ClientForm::from_client(&existing);
                apply_client_fields(&mut form, fields);
                for day in toggle_days {
                    form.toggle_day(day);
                }
                let client = clients::save_client(&repo, Some(&id), form)?;
                println!("Cliente actualizado: {}", client.name);
            }
            ClientsCommand::Delete { id } => {
                clients::delete_client(&repo, &id)?;
                println!("Cliente eliminado");
            }
            ClientsCommand::Import { path } => {
                let file = File::open(&path).map_err(|source| {
                    log::error!("Failed to open {}: {source}", path.display());
                    ServiceError::Io {
                        path: path.display().to_string(),
                        source,
                    }
                })?;
                let created = clients::import_clients(&repo, ClientImportForm::new(file))?;
                println!("{created} clientes importados");
            }
        },
        Command::Products { command } => match command {
            ProductsCommand::List => {
                print!("{}", render::products(&products::list_products(&repo)?));
            }
            ProductsCommand::Add { fields } => {
                let mut form = ProductForm::default();
                apply_product_fields(&mut form, fields);
                let product = products::save_product(&repo, None, form)?;
                println!("Producto creado: {} ({})", product.name, product.id);
            }
            ProductsCommand::Edit {
                id,
                fields,
                no_wholesale,
            } => {
                let existing = products::get_product(&repo, &id)?;
                let mut form = ProductForm::from_product(&existing);
                apply_product_fields(&mut form, fields);
                if no_wholesale {
                    form.wholesale_price = None;
                }
                let product = products::save_product(&repo, Some(&id), form)?;
                println!("Producto actualizado: {}", product.name);
            }
            ProductsCommand::Delete { id } => {
                products::delete_product(&repo, &id)?;
                println!("Producto eliminado");
            }
        },
        Command::Orders { command } => match command {
            OrdersCommand::List { status } => {
                let page = orders::list_orders(&repo, status.map(OrderStatus::from))?;
                print!("{}", render::orders(&page));
            }
            OrdersCommand::Show { id } => {
                print!("{}", render::order_detail(&orders::get_order(&repo, &id)?));
            }
            OrdersCommand::Create {
                client,
                items,
                notes,
            } => {
                let form = OrderForm {
                    client_id: client,
                    items,
                    notes,
                };
                let (order, quote) = orders::create_order(&repo, form)?;
                print!("{}", render::quote(&quote));
                println!("Pedido creado: {}", order.id);
            }
            OrdersCommand::Complete { id } => {
                let order = orders::update_order_status(&repo, &id, OrderStatus::Completed)?;
                println!("Pedido {}: {}", order.id, order.status);
            }
            OrdersCommand::Cancel { id } => {
                let order = orders::update_order_status(&repo, &id, OrderStatus::Cancelled)?;
                println!("Pedido {}: {}", order.id, order.status);
            }
            OrdersCommand::Pay { id, amount } => {
                let order = orders::register_payment(&repo, &id, PaymentForm { amount })?;
                print!("{}", render::order_detail(&order));
            }
            OrdersCommand::Invoice { id, output } => {
                save_document(&repo, &id, OrderDocument::Invoice, output)?;
            }
            OrdersCommand::WorkOrder { id, output } => {
                save_document(&repo, &id, OrderDocument::WorkOrder, output)?;
            }
        },
    }

    Ok(())
}
