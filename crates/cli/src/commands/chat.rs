//! Chat commands.

use folio_client::{ChatClient, ChatWidget, ClientConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::CommandError;

/// Send one question and print the answer.
#[allow(clippy::print_stdout)]
pub async fn ask(config: &ClientConfig, text: &str) -> Result<(), CommandError> {
    let client = ChatClient::new(config)?;
    let mut widget = ChatWidget::new();
    widget.set_input(text);

    if widget.send_message(&client).await
        && let Some(reply) = widget.transcript().last()
    {
        println!("{}", reply.text);
    }
    Ok(())
}

/// Read questions from stdin until EOF or `/quit`, printing each answer.
#[allow(clippy::print_stdout)]
pub async fn interactive(config: &ClientConfig) -> Result<(), CommandError> {
    let client = ChatClient::new(config)?;
    let mut widget = ChatWidget::new();
    widget.open();

    println!("Chatting with {} (type /quit to leave)", client.endpoint());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }

        widget.set_input(line);
        if widget.send_message(&client).await
            && let Some(reply) = widget.transcript().last()
        {
            println!("bot> {}", reply.text);
        }
    }

    widget.close();
    Ok(())
}
