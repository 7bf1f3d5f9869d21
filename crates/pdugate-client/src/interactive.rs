//! Menu-driven client session.
//!
//! Reads a menu choice and its arguments as whitespace-separated tokens, so
//! `2 7 1 00ab` on one line works the same as one value per prompt. Each
//! completed entry is sent through [`Client::send`] and the ack printed with
//! [`render_ack`]. End of input behaves like choosing Exit.

use std::{collections::VecDeque, io::Write, str::FromStr};

use pdugate_proto::{DeregistrationRequest, PduSessionRequest, RegistrationRequest, Request};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{Client, ClientError, render_ack};

const MENU: &str = "\n--- pdugate client ---
1. Register User
2. Request PDU Session
3. Deregister User
4. Exit";

/// Printed when the menu choice is not one of the listed options.
pub const INVALID_CHOICE: &str = "Invalid choice. Try again.";

/// Printed when an id or sst is not an integer.
pub const INVALID_NUMBER: &str = "Invalid number. Try again.";

/// Why an entry did not produce a request.
enum Stop {
    Exit,
    InvalidChoice,
    InvalidNumber,
    Failed(ClientError),
}

impl From<ClientError> for Stop {
    fn from(err: ClientError) -> Self {
        Self::Failed(err)
    }
}

impl From<std::io::Error> for Stop {
    fn from(err: std::io::Error) -> Self {
        Self::Failed(err.into())
    }
}

struct Tokens<R> {
    lines: Lines<R>,
    pending: VecDeque<String>,
}

impl<R> Tokens<R>
where
    R: AsyncBufRead + Unpin,
{
    fn new(input: R) -> Self {
        Self { lines: input.lines(), pending: VecDeque::new() }
    }

    async fn next(&mut self) -> Result<Option<String>, ClientError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            match self.lines.next_line().await? {
                Some(line) => self.pending.extend(line.split_whitespace().map(str::to_string)),
                None => return Ok(None),
            }
        }
    }

    async fn prompted<W: Write>(&mut self, output: &mut W, label: &str) -> Result<String, Stop> {
        write!(output, "{label}")?;
        output.flush()?;
        self.next().await?.ok_or(Stop::Exit)
    }

    async fn number<W, T>(&mut self, output: &mut W, label: &str) -> Result<T, Stop>
    where
        W: Write,
        T: FromStr,
    {
        self.prompted(output, label).await?.parse().map_err(|_| Stop::InvalidNumber)
    }
}

async fn read_request<R, W>(tokens: &mut Tokens<R>, output: &mut W) -> Result<Request, Stop>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{MENU}")?;
    let choice = tokens.prompted(output, "Enter choice: ").await?;

    match choice.as_str() {
        "1" => {
            let id = tokens.number(output, "Enter User ID: ").await?;
            Ok(RegistrationRequest { id }.into())
        },
        "2" => {
            let id = tokens.number(output, "Enter User ID: ").await?;
            let sst = tokens.number(output, "Enter SST (1-255): ").await?;
            let sd = tokens.prompted(output, "Enter SD (4 hex digits, e.g., 00ab): ").await?;
            Ok(PduSessionRequest { id, sst, sd }.into())
        },
        "3" => {
            let id = tokens.number(output, "Enter User ID: ").await?;
            Ok(DeregistrationRequest { id }.into())
        },
        "4" => Err(Stop::Exit),
        _ => Err(Stop::InvalidChoice),
    }
}

/// Run the menu loop until Exit or end of input.
///
/// A request that fails in transit is reported on `output` and the loop
/// continues; only failures to read `input` or write `output` end it early.
pub async fn run_interactive<R, W>(
    client: &Client,
    input: R,
    mut output: W,
) -> Result<(), ClientError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut tokens = Tokens::new(input);

    loop {
        let request = match read_request(&mut tokens, &mut output).await {
            Ok(request) => request,
            Err(Stop::Exit) => break,
            Err(Stop::InvalidChoice) => {
                writeln!(output, "{INVALID_CHOICE}")?;
                continue;
            },
            Err(Stop::InvalidNumber) => {
                writeln!(output, "{INVALID_NUMBER}")?;
                continue;
            },
            Err(Stop::Failed(e)) => return Err(e),
        };

        match client.send(request).await {
            Ok(ack) => writeln!(output, "{}", render_ack(&ack))?,
            Err(e) => {
                tracing::warn!("Request failed: {}", e);
                writeln!(output, "Request failed: {e}")?;
            },
        }
    }

    output.flush()?;
    Ok(())
}
