//! Interface de linha de comando da oficina baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, shell, demo, status)
//! e flags globais (--config, --audit-log, --max-pending, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cyclechronicles::audit::DEFAULT_LOG_FILE;

/// cyclechronicles: fila de pedidos de reparo de uma pequena oficina de bicicletas.
#[derive(Debug, Parser)]
#[command(name = "cyclechronicles", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho do arquivo de configuração (padrão: ./cyclechronicles.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Arquivo CSV que recebe a trilha de auditoria. Sem valor, usa
    /// `_contact_log.csv` no diretório atual.
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = DEFAULT_LOG_FILE)]
    pub audit_log: Option<PathBuf>,

    /// Máximo de pedidos pendentes ao mesmo tempo.
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pending: Option<u32>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Executa os passos de um script TOML ou JSON numa oficina nova.
    Run {
        /// Caminho do script (`.json` para JSON, qualquer outro para TOML).
        script: PathBuf,
    },

    /// Lê passos da entrada padrão, um por linha (`accept <cliente> <tipo>`,
    /// `repair`, `deliver <cliente>`, `status`).
    Shell,

    /// Executa a demonstração embutida do ciclo de vida de um pedido.
    Demo,

    /// Mostra a configuração efetiva.
    Status,
}
