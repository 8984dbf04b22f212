//! Terminal front end for the registration form.
//!
//! Prompts for each field, resolves the address when the postal code is
//! entered, submits, and prints the refreshed list. Ctrl+D quits.

use client::{view, AddressResolver, FormClient, FormError, RecordsApi};
use dotenvy::dotenv;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::watch;
use tracing::{error, info};

type Input = Lines<BufReader<Stdin>>;

async fn prompt(lines: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    let mut out = io::stdout();
    out.write_all(format!("{label}: ").as_bytes()).await?;
    out.flush().await?;
    Ok(lines.next_line().await?)
}

fn alert(e: &FormError) {
    println!("[{}] {}", e.title(), e);
}

fn show_list<A: AddressResolver, R: RecordsApi>(form: &FormClient<A, R>) {
    println!("\n== Records ==");
    println!("{}", view::render_list(form.is_loading(), form.records()));
}

/// Print the loading text each time a reload starts. Ends with the form.
fn spawn_loading_indicator(mut loading: watch::Receiver<bool>) {
    tokio::spawn(async move {
        while loading.changed().await.is_ok() {
            if *loading.borrow_and_update() {
                println!("{}", view::LOADING);
            }
        }
    });
}

/// One pass through the form. `None` when input ended.
async fn fill_and_submit<A: AddressResolver, R: RecordsApi>(
    form: &mut FormClient<A, R>,
    lines: &mut Input,
) -> anyhow::Result<Option<()>> {
    let Some(cpf) = prompt(lines, "CPF").await? else { return Ok(None) };
    form.fields_mut().cpf = cpf;
    let Some(name) = prompt(lines, "Name").await? else { return Ok(None) };
    form.fields_mut().name = name;
    let Some(age) = prompt(lines, "Age").await? else { return Ok(None) };
    form.fields_mut().age = age;
    let Some(postal_code) = prompt(lines, "Postal code").await? else { return Ok(None) };
    // a new postal code invalidates the previously resolved address
    form.fields_mut().postal_code = postal_code;
    form.fields_mut().address.clear();

    // 输入完成即视为失焦，触发地址查询
    match form.postal_code_blur().await {
        Ok(address) => println!("Address: {address}"),
        Err(e) => alert(&e),
    }

    match form.submit().await {
        Ok(submitted) => {
            println!("[Success] {}", client::form::MSG_REGISTERED);
            if let Err(e) = submitted.reload {
                alert(&e);
            }
            show_list(form);
        }
        Err(e) => alert(&e),
    }
    Ok(Some(()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_cli();

    let cfg = configs::AppConfig::load_client()?;
    info!(service_url = %cfg.service_url, lookup_url = %cfg.address_lookup_url, "form client starting");
    let mut form = client::from_config(&cfg);
    spawn_loading_indicator(form.loading_watch());

    println!("== Registration ==");
    if let Err(e) = form.start().await {
        alert(&e);
    }
    show_list(&form);

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        println!();
        match fill_and_submit(&mut form, &mut lines).await {
            Ok(Some(())) => {}
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "terminal i/o failed");
                return Err(e);
            }
        }
    }
    Ok(())
}
