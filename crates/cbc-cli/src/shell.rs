//! Interactive two-tab session ("Consulta" / "API Status").
//!
//! Each input line is one command. Searches run to completion before the
//! next prompt. Ctrl-C while a search is pending cancels it; Ctrl-C at the
//! prompt ends the session.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use cbc_core::{
    format_cpf, render_state, ApiStatusPanel, MockCitizenSource, MockSourceConfig, Notifier,
    SearchController, SearchError,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Consulta,
    Status,
}

impl Tab {
    fn label(&self) -> &'static str {
        match self {
            Tab::Consulta => "Consulta",
            Tab::Status => "API Status",
        }
    }
}

/// Result of handling one line.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

pub const HEADER: &str = "Consulta CPF Brasil\nSistema de consulta ao Cadastro Base do Cidadão\n\
                          Dados para demonstração apenas. Digite 'ajuda' para ver os comandos.\n";

const HELP: &str = "\
Comandos:
  consulta <cpf>   consulta um CPF (aba Consulta)
  nova             limpa o resultado para uma nova consulta
  status           mostra o status da API CBC-CPF (aba API Status)
  atualizar        atualiza o status da API
  ajuda            mostra esta ajuda
  sair             encerra a sessão
";

pub struct Shell {
    controller: SearchController,
    panel: ApiStatusPanel,
    tab: Tab,
}

impl Shell {
    pub fn new(config: MockSourceConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            controller: SearchController::new(Arc::new(MockCitizenSource::new(config)), notifier),
            panel: ApiStatusPanel,
            tab: Tab::Consulta,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn prompt(&self) -> String {
        format!("[{}]> ", self.tab().label())
    }

    /// Handle one line; Ctrl-C cancels a search it starts.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        self.handle_line_until(line, interrupted()).await
    }

    /// Handle one line; a search it starts is cancelled if `interrupt`
    /// completes first.
    pub async fn handle_line_until<F>(&mut self, line: &str, interrupt: F) -> Reply
    where
        F: Future<Output = ()>,
    {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => Reply::Print(String::new()),
            "consulta" | "c" => {
                self.tab = Tab::Consulta;
                Reply::Print(self.search(arg, interrupt).await)
            }
            "nova" => {
                self.tab = Tab::Consulta;
                if self.controller.clear().await {
                    Reply::Print("Pronto para uma nova consulta.\n".to_string())
                } else {
                    Reply::Print("Aguarde a consulta em andamento.\n".to_string())
                }
            }
            "status" => {
                self.tab = Tab::Status;
                Reply::Print(self.panel.render())
            }
            "atualizar" => {
                self.tab = Tab::Status;
                self.panel.refresh();
                Reply::Print(self.panel.render())
            }
            "ajuda" | "help" => Reply::Print(HELP.to_string()),
            "sair" | "exit" | "quit" => Reply::Quit,
            other => Reply::Print(format!(
                "Comando desconhecido: {other}. Digite 'ajuda' para ver os comandos.\n"
            )),
        }
    }

    async fn search<F>(&mut self, input: &str, interrupt: F) -> String
    where
        F: Future<Output = ()>,
    {
        let mut out = format!("CPF: {}\n", format_cpf(input));

        let task = match self.controller.submit(input).await {
            Ok(task) => task,
            // the notifier already reported the rejection
            Err(SearchError::InvalidCpf(_)) => return out,
            Err(err) => {
                out.push_str(&format!("{err}\n"));
                return out;
            }
        };

        let abort = task.abort_handle();
        let join = task.join();
        tokio::pin!(join);
        tokio::pin!(interrupt);
        let result = tokio::select! {
            res = &mut join => res,
            _ = &mut interrupt => {
                abort.abort();
                join.await
            }
        };

        match result {
            Ok(_) => {
                out.push_str(&render_state(&self.controller.snapshot().await));
                out.push_str("\nDigite 'nova' para uma nova consulta.\n");
            }
            Err(SearchError::Cancelled) => out.push_str("Consulta cancelada.\n"),
            Err(err) => out.push_str(&format!("{err}\n")),
        }
        out
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Read commands from stdin until `sair`, EOF or Ctrl-C at the prompt.
///
/// Once installed, the Ctrl-C handler replaces the default for the whole
/// process, so the prompt has to listen for it too.
pub async fn run(mut shell: Shell) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(HEADER.as_bytes()).await?;
    loop {
        stdout.write_all(shell.prompt().as_bytes()).await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = interrupted() => {
                stdout.write_all(b"\n").await?;
                None
            }
        };
        let Some(line) = line else {
            break;
        };
        match shell.handle_line(&line).await {
            Reply::Print(text) => stdout.write_all(text.as_bytes()).await?,
            Reply::Quit => break,
        }
    }
    stdout.flush().await?;
    Ok(())
}
