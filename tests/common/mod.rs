use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const BATCH_HEADER: [&str; 12] = [
    "client_id",
    "first_name",
    "last_name",
    "email",
    "invoice_id",
    "description",
    "amount",
    "cardnum",
    "expdate",
    "cvv",
    "token",
    "store",
];

pub fn write_batch_csv(path: &Path, rows: &[[&str; 12]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(BATCH_HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Generates a token-charge batch with randomized amounts, one invoice per row.
pub fn generate_token_batch(path: &Path, rows: usize) -> Result<(), Error> {
    use rand::Rng;

    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(BATCH_HEADER)?;

    let mut rng = rand::thread_rng();
    for i in 1..=rows {
        let amount = format!("{}.{:02}", rng.gen_range(1..500), rng.gen_range(0..100));
        let invoice = i.to_string();
        let token = format!("tok_{i}");
        wtr.write_record([
            "42",
            "Ada",
            "Lovelace",
            "ada@example.com",
            invoice.as_str(),
            "Recurring charge",
            amount.as_str(),
            "",
            "",
            "",
            token.as_str(),
            "false",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
