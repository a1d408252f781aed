//! Saída de terminal da oficina: mensagens coloridas por resultado.
//!
//! Usa a crate `console` para estilização com cores. O [`OutcomePrinter`]
//! formata cada [`Outcome`] de uma sessão e o relatório final.

use console::Style;

use crate::order::Order;
use crate::session::{Outcome, SessionReport};
use crate::shop::ShopSnapshot;

/// Formata resultados de passos para o terminal.
///
/// Verde para pedidos aceitos, reparados e entregues; amarelo quando não há
/// nada a fazer; vermelho para recusas e pedidos inválidos.
pub struct OutcomePrinter {
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl Default for OutcomePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomePrinter {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }

    /// Texto de uma linha para o resultado, já com cores.
    pub fn line(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Accepted(order) => {
                format!("  {} accepted {order}", self.green.apply_to("✓"))
            }
            Outcome::Rejected { order, reason } => {
                format!("  {} rejected {order}: {reason}", self.red.apply_to("✗"))
            }
            Outcome::Invalid(e) => format!("  {} invalid order: {e}", self.red.apply_to("✗")),
            Outcome::Repaired(order) => {
                format!("  {} repaired {order}", self.green.apply_to("⚙"))
            }
            Outcome::NothingToRepair => {
                format!("  {} no pending orders to repair", self.yellow.apply_to("–"))
            }
            Outcome::Delivered(order) => {
                format!("  {} delivered {order}", self.green.apply_to("→"))
            }
            Outcome::NothingToDeliver(customer) => format!(
                "  {} nothing to deliver for {customer}",
                self.yellow.apply_to("–")
            ),
            Outcome::Status(snapshot) => self.status(snapshot),
        }
    }

    pub fn print(&self, outcome: &Outcome) {
        println!("{}", self.line(outcome));
    }

    fn status(&self, snapshot: &ShopSnapshot) -> String {
        let list = |orders: &[Order]| {
            if orders.is_empty() {
                self.dim.apply_to("none").to_string()
            } else {
                orders
                    .iter()
                    .map(|o| o.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        };
        format!(
            "  pending {}/{}: {}\n  completed: {}",
            snapshot.pending.len(),
            snapshot.capacity,
            list(&snapshot.pending),
            list(&snapshot.completed)
        )
    }

    /// Imprime o relatório da sessão formatado em JSON.
    pub fn print_report(&self, report: &SessionReport) {
        let style = if report.rejected + report.invalid > 0 {
            &self.yellow
        } else {
            &self.green
        };
        println!();
        println!("{}", style.apply_to("─── Session Report ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_default()
        );
    }
}
