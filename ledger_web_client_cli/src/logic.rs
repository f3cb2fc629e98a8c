use crate::DEFAULT_BASE_URL;
use ledger_common::cli::constants::*;
use ledger_common::amount::parse_amount;
use ledger_common::cli::helpers::*;
use ledger_common::{Account, ErrorResponse, TransferRequest, TransferResponse};
use reqwest::{Client, Response, StatusCode, Url};
use std::error::Error;

pub async fn main_loop(base_url: Url) -> Result<(), Box<dyn Error>> {
    let client = Client::new();

    loop {
        if let Some(line) = read_from_stdin(PROMPT) {
            let words = line.split_whitespace().collect::<Vec<_>>();
            let cmd = words[0].to_lowercase();

            match cmd.as_str() {
                HELP | "h" => help(),
                ACCOUNTS | "a" => print_accounts(&client, &base_url).await?,
                ACCOUNT | "c" => print_single_account(words, &client, &base_url).await?,
                TRANSFER | "t" => transfer(words, &client, &base_url).await?,
                QUIT | "q" => break,
                _ => println!("Unrecognized command; try `help`."),
            }
        }
    }

    Ok(())
}

/// **Get base URL**
///
/// Tries to create a URL from the provided argument.
///
/// If that is not possible, falls back to a default.
///
/// It returns a URL in any case.
///
/// This is meant to be a base URL for all operations.
///
/// - If the provided argument is the `None` variant,
///   returns a default value as the base URL.
/// - If it's a `String`, tries to parse it into URL.
///   - If it's a valid URL string, returns it as URL.
///   - If it's a malformed URL string, returns the default.
///
/// The default value is [`DEFAULT_BASE_URL`].
pub fn get_base_url(base_url: Option<String>) -> Url {
    let base_url = base_url.unwrap_or_else(|| {
        println!(
            "No CLI base URL provided; using default: {}",
            DEFAULT_BASE_URL
        );
        DEFAULT_BASE_URL.into()
    });

    Url::parse(base_url.as_str()).unwrap_or_else(|_| {
        println!(
            "Provided base URL could not be parsed; using default: {}",
            DEFAULT_BASE_URL
        );
        Url::parse(DEFAULT_BASE_URL).expect("The default base URL is a valid URL.")
    })
}

/// **Builds a transfer request from the command's words**
///
/// The command is: `transfer <from> <to> <amount>`.
///
/// Account IDs are opaque single words.
/// The amount is checked with the same rules the service applies,
/// so that an obviously invalid request isn't even sent.
fn parse_transfer(words: &[&str]) -> Option<TransferRequest> {
    if words.len() != 4 {
        println!("The transfer command: {TRANSFER} <from ID> <to ID> <amount>");
        return None;
    }

    let (from, to, amount) = (words[1], words[2], words[3]);

    if !is_valid_id(from) || !is_valid_id(to) {
        return None;
    }

    if parse_amount(amount).is_err() {
        cannot_parse_amount(amount);
        return None;
    }

    Some(TransferRequest {
        from: from.to_string(),
        to: to.to_string(),
        amount: amount.to_string(),
    })
}

/// Prints the service's error response.
async fn print_error(response: Response) -> Result<(), Box<dyn Error>> {
    let status = response.status();
    let text = response.text().await?;

    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(error) => eprintln!("[ERROR] {} {}: {}", status, error.error, error.message),
        Err(_) => eprintln!("[ERROR] {} \"{}\"", status, text),
    }

    Ok(())
}

/// **Transfer funds from one account to another account**
///
/// Both accounts need to exist in advance, and the sender
/// needs to have at least the amount on its balance.
/// If not, an error message will be output to the user,
/// but the execution won't break.
async fn transfer(words: Vec<&str>, client: &Client, base_url: &Url) -> Result<(), Box<dyn Error>> {
    let Some(request) = parse_transfer(&words) else {
        return Ok(());
    };

    let url = base_url.join("transfer")?;
    let response = client.post(url).json(&request).send().await?;

    if response.status().is_success() {
        let response: TransferResponse = response.json().await?;
        println!("{}", response.message);
    } else {
        print_error(response).await?;
    }

    Ok(())
}

/// **Print all accounts and their balances**
pub async fn print_accounts(client: &Client, base_url: &Url) -> Result<(), Box<dyn Error>> {
    let url = base_url.join("accounts")?;
    let response = client.get(url).send().await?;

    if response.status() == StatusCode::OK {
        let accounts: Vec<Account> = response.json().await?;
        println!("Accounts and their balances:");
        for account in accounts {
            println!(
                "ID: {}, Name: {}, Balance: {}",
                account.id,
                account.name,
                account.balance()
            );
        }
    } else {
        print_error(response).await?;
    }

    Ok(())
}

/// The URL of a single account, with the ID as one escaped path segment
fn account_url(base_url: &Url, id: &str) -> Result<Url, Box<dyn Error>> {
    let mut url = base_url.join("accounts")?;
    url.path_segments_mut()
        .map_err(|_| format!("Cannot use {base_url} as a base URL"))?
        .push(id);
    Ok(url)
}

/// **Print a single requested account**
async fn print_single_account(
    words: Vec<&str>,
    client: &Client,
    base_url: &Url,
) -> Result<(), Box<dyn Error>> {
    if words.len() != 2 {
        println!("The account command: {ACCOUNT} <ID>");
        return Ok(());
    }

    let id = words[1];

    if is_valid_id(id) {
        let url = account_url(base_url, id)?;
        let response = client.get(url).send().await?;

        match response.status().as_u16() {
            200..=299 => {
                let account: Account = response.json().await?;
                println!(
                    r#"The account "{}" ("{}") has the following balance: {}."#,
                    account.id,
                    account.name,
                    account.balance()
                )
            }
            400..=599 => print_error(response).await?,
            _ => println!("[ERROR] Unexpected status code: {}", response.status()),
        }
    }

    Ok(())
}
