//! Step-by-step driving of a [`Shop`].
//!
//! A [`Session`] applies [`Step`]s (accept / repair / deliver / status) to a
//! shop and reports an [`Outcome`] for each. Steps come from a TOML or JSON
//! script, from text lines typed into the shell, or from [`demo_steps`].

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, Result, ShopError};
use crate::order::{BicycleType, Order, OrderRequest};
use crate::shop::{Rejection, Shop, ShopSnapshot};

/// One instruction for the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    Accept(OrderRequest),
    Repair,
    Deliver { customer: String },
    Status,
}

impl FromStr for Step {
    type Err = ShopError;

    /// Parse `accept <customer> <type>`, `repair`, `deliver <customer>` or `status`.
    ///
    /// Customer names may contain spaces. With two or more words after
    /// `accept`, the last word must be a bicycle type: `accept Mary Ann`
    /// fails with [`OrderError::UnknownBicycleType`] for `Ann`. A lone word
    /// is taken as the type if it names one, otherwise as the customer, and
    /// the order is then rejected as incomplete when it is built.
    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words
            .next()
            .ok_or_else(|| ShopError::Script("empty step".to_string()))?;
        let args: Vec<&str> = words.collect();

        match command.to_lowercase().as_str() {
            "accept" => Ok(Step::Accept(parse_request(&args)?)),
            "repair" if args.is_empty() => Ok(Step::Repair),
            "status" if args.is_empty() => Ok(Step::Status),
            "deliver" if !args.is_empty() => Ok(Step::Deliver {
                customer: args.join(" "),
            }),
            "deliver" => Err(ShopError::Script("deliver needs a customer".to_string())),
            "repair" | "status" => Err(ShopError::Script(format!(
                "{command} takes no arguments"
            ))),
            other => Err(ShopError::Script(format!("unknown step: {other}"))),
        }
    }
}

fn parse_request(args: &[&str]) -> Result<OrderRequest> {
    match args {
        [] => Ok(OrderRequest::default()),
        [single] => match single.parse::<BicycleType>() {
            Ok(ty) => Ok(OrderRequest {
                customer: None,
                bicycle_type: Some(ty),
            }),
            Err(_) => Ok(OrderRequest {
                customer: Some(single.to_string()),
                bicycle_type: None,
            }),
        },
        [customer @ .., ty] => {
            let ty = ty.parse::<BicycleType>()?;
            Ok(OrderRequest::new(customer.join(" "), ty))
        }
    }
}

/// A list of steps loaded from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Load a script; `.json` files are read as JSON, anything else as TOML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_toml(&contents)
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Parse the text form, one step per line. Blank lines and `#` comments are skipped.
    pub fn from_lines(contents: &str) -> Result<Self> {
        let steps = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with('#')
            })
            .map(|(i, line)| {
                line.parse::<Step>().map_err(|e| match e {
                    ShopError::Script(msg) => ShopError::Script(format!("line {}: {msg}", i + 1)),
                    other => ShopError::Script(format!("line {}: {other}", i + 1)),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }
}

/// What happened when a step was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Order),
    Rejected { order: Order, reason: Rejection },
    Invalid(OrderError),
    Repaired(Order),
    NothingToRepair,
    Delivered(Order),
    NothingToDeliver(String),
    Status(ShopSnapshot),
}

/// Counts of outcomes over a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub steps: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub invalid: usize,
    pub repaired: usize,
    pub delivered: usize,
    pub idle_steps: usize,
    pub pending_left: usize,
    pub awaiting_pickup: usize,
}

/// Applies steps to a shop and keeps track of the outcomes.
#[derive(Debug, Default)]
pub struct Session {
    shop: Shop,
    report: SessionReport,
}

impl Session {
    pub fn new(shop: Shop) -> Self {
        Self {
            shop,
            report: SessionReport::default(),
        }
    }

    /// Apply a single step.
    ///
    /// Invalid intake data is reported as [`Outcome::Invalid`] rather than
    /// aborting the session.
    pub fn apply(&mut self, step: Step) -> Outcome {
        self.report.steps += 1;
        let outcome = match step {
            Step::Accept(request) => match Order::try_from(request) {
                Ok(order) => match self.shop.try_accept(order.clone()) {
                    Ok(()) => Outcome::Accepted(order),
                    Err(reason) => Outcome::Rejected { order, reason },
                },
                Err(e) => Outcome::Invalid(e),
            },
            Step::Repair => self
                .shop
                .repair()
                .map_or(Outcome::NothingToRepair, Outcome::Repaired),
            Step::Deliver { customer } => match self.shop.deliver(&customer) {
                Some(order) => Outcome::Delivered(order),
                None => Outcome::NothingToDeliver(customer),
            },
            Step::Status => Outcome::Status(self.shop.snapshot()),
        };
        self.count(&outcome);
        outcome
    }

    /// Apply every step in order.
    pub fn run(&mut self, steps: impl IntoIterator<Item = Step>) -> Vec<Outcome> {
        steps.into_iter().map(|step| self.apply(step)).collect()
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn into_shop(self) -> Shop {
        self.shop
    }

    /// Outcome counts so far, plus what is still in the shop.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            pending_left: self.shop.pending_len(),
            awaiting_pickup: self.shop.completed_len(),
            ..self.report.clone()
        }
    }

    fn count(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Accepted(_) => self.report.accepted += 1,
            Outcome::Rejected { .. } => self.report.rejected += 1,
            Outcome::Invalid(_) => self.report.invalid += 1,
            Outcome::Repaired(_) => self.report.repaired += 1,
            Outcome::Delivered(_) => self.report.delivered += 1,
            Outcome::NothingToRepair | Outcome::NothingToDeliver(_) => {
                self.report.idle_steps += 1
            }
            Outcome::Status(_) => {}
        }
    }
}

/// The walk-through scenario: one customer's bicycle from drop-off to pickup.
pub fn demo_steps() -> Vec<Step> {
    vec![
        Step::Accept(OrderRequest::new("Alice", BicycleType::Race)),
        Step::Accept(OrderRequest::new("Alice", BicycleType::Race)),
        Step::Accept(OrderRequest::new("Bob", BicycleType::Gravel)),
        Step::Repair,
        Step::Status,
        Step::Deliver {
            customer: "Alice".to_string(),
        },
        Step::Deliver {
            customer: "Alice".to_string(),
        },
        Step::Repair,
    ]
}
