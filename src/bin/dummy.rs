use audit_ledger::client::Client;
use audit_ledger::settings::ANON_KEY;
use audit_ledger::settings::BASE_URL;
use audit_ledger::traits::AuditSource;

#[tokio::main]
async fn main() {
    // This is just a function to silence "unused function" warning

    let client = Client::new(BASE_URL, ANON_KEY).unwrap();
    let weeks = client.weeks().await.unwrap();
    let _ = weeks.iter()
        .map(|week| println!("  {}\t{} – {}", week.title(), week.start_date(), week.end_date()))
        .collect::<()>();
}
