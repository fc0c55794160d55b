use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use storefront_checkout::application::{
    CompletePayment, CompletePaymentInput, CreateTransaction, CreateTransactionInput,
};
use storefront_checkout::config::Config;
use storefront_checkout::domain::Product;
use storefront_checkout::domain::ports::{CardDetails, PaymentGateway, ProductStore};
use storefront_checkout::infrastructure::in_memory::InMemoryStore;
use storefront_checkout::infrastructure::wompi::WompiGateway;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the demo catalog
    Catalog,
    /// Run a full checkout: create the transaction, tokenize the card and
    /// complete the payment against the configured gateway
    Checkout {
        /// Catalog position of the product to buy (see `catalog`)
        #[arg(long, default_value_t = 1)]
        product: usize,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        card_number: String,
        #[arg(long)]
        cvc: String,
        /// Expiration month, two digits
        #[arg(long)]
        exp_month: String,
        /// Expiration year, two digits
        #[arg(long)]
        exp_year: String,
        #[arg(long)]
        card_holder: String,
        #[arg(long, default_value_t = 1)]
        installments: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store = InMemoryStore::new();
    for product in demo_catalog() {
        store.insert_product(product).await;
    }

    match cli.command {
        Command::Catalog => {
            let products = ProductStore::find_all(&store).await.into_diagnostic()?;
            for (position, product) in products.iter().enumerate() {
                println!(
                    "{}. {} — {} {} (stock {})",
                    position + 1,
                    product.name,
                    product.price_cents,
                    config.currency,
                    product.stock
                );
            }
        }
        Command::Checkout {
            product,
            quantity,
            email,
            name,
            phone,
            address,
            city,
            card_number,
            cvc,
            exp_month,
            exp_year,
            card_holder,
            installments,
        } => {
            let products = ProductStore::find_all(&store).await.into_diagnostic()?;
            let chosen = products
                .get(product.saturating_sub(1))
                .ok_or_else(|| miette!("no product at catalog position {product}"))?;

            let create = CreateTransaction::new(
                Box::new(store.clone()),
                Box::new(store.clone()),
                Box::new(store.clone()),
                config.fees,
            );
            let created = create
                .execute(CreateTransactionInput {
                    product_id: chosen.id,
                    quantity,
                    customer_email: email,
                    customer_full_name: name,
                    customer_phone: phone,
                    customer_address: address,
                    customer_city: city,
                })
                .await
                .into_diagnostic()?;
            if created.is_failure() {
                return Err(miette!("{}", created.error()));
            }
            let transaction = created.value();
            println!(
                "transaction {} created for {} {}",
                transaction.reference, transaction.total_cents, config.currency
            );

            let gateway = WompiGateway::new(&config.gateway);
            let card = gateway
                .tokenize_card(CardDetails {
                    number: card_number,
                    cvc,
                    exp_month,
                    exp_year,
                    card_holder,
                })
                .await
                .into_diagnostic()?;
            println!("card tokenized ({})", card.brand);
            let acceptance = gateway.acceptance_tokens().await.into_diagnostic()?;

            let complete = CompletePayment::new(
                Box::new(store.clone()),
                Box::new(gateway),
                Box::new(store.clone()),
                Box::new(store.clone()),
                Box::new(store.clone()),
                config.currency.clone(),
            );
            let completed = complete
                .execute(CompletePaymentInput {
                    transaction_id: transaction.id,
                    card_token: card.token_id,
                    installments,
                    acceptance_token: acceptance.acceptance_token,
                    accept_personal_auth: acceptance.accept_personal_auth,
                })
                .await
                .into_diagnostic()?;
            if completed.is_failure() {
                return Err(miette!("{}", completed.error()));
            }

            let final_tx = completed.value();
            println!("payment finished with status {}", final_tx.status);
            println!(
                "{}",
                serde_json::to_string_pretty(&final_tx).into_diagnostic()?
            );
        }
    }

    Ok(())
}

/// Demo products seeded into the in-memory catalog on every run.
fn demo_catalog() -> Vec<Product> {
    vec![
        Product::new(
            "Wireless Bluetooth Headphones",
            "Premium wireless headphones with active noise cancellation and 30-hour battery life.",
            15_000_000,
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500",
            25,
        ),
        Product::new(
            "Smart Fitness Watch",
            "Fitness tracker with heart rate monitor, GPS and 7-day battery life.",
            25_000_000,
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500",
            15,
        ),
        Product::new(
            "Portable Bluetooth Speaker",
            "Compact waterproof speaker with 360-degree sound and 12-hour playtime.",
            8_000_000,
            "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=500",
            40,
        ),
        Product::new(
            "Mechanical Gaming Keyboard",
            "RGB backlit mechanical keyboard with programmable macros.",
            12_000_000,
            "https://images.unsplash.com/photo-1541140532154-b024d1c0c78e?w=500",
            30,
        ),
        Product::new(
            "USB-C Hub Adapter",
            "Multi-port USB-C hub with HDMI 4K and 100W power delivery pass-through.",
            6_500_000,
            "https://images.unsplash.com/photo-1625842268584-8f3296236761?w=500",
            50,
        ),
        Product::new(
            "Wireless Charging Pad",
            "Fast Qi wireless charger with LED indicator and overheat protection.",
            4_500_000,
            "https://images.unsplash.com/photo-1586816879360-004f5b0c51e3?w=500",
            60,
        ),
    ]
}
