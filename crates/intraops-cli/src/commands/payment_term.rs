//! Payment term commands

use clap::{Args, Subcommand};
use intraops_core::accounting::{
    CreatePaymentTerm, DeletePaymentTerm, GetPaymentTerm, ListPaymentTerms, UpdatePaymentTerm,
};
use intraops_core::errors::Result;
use serde_json::json;

use super::{print_json, services, GlobalArgs, ListArgs};

#[derive(Debug, Args)]
pub struct PaymentTermArgs {
    #[command(subcommand)]
    pub command: PaymentTermCommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentTermCommand {
    /// Create a payment term
    Create(TermFields),
    /// Replace the fields of a payment term
    Update {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: TermFields,
    },
    /// Delete a payment term
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Show one payment term
    Get {
        #[arg(long)]
        id: String,
    },
    /// List payment terms by name
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct TermFields {
    #[arg(long)]
    pub name: String,

    /// Days until the full amount is due
    #[arg(long)]
    pub days: u32,

    /// Days within which the early-payment discount applies
    #[arg(long, default_value_t = 0)]
    pub discount_days: u32,

    /// Early-payment discount in basis points (250 = 2.5%)
    #[arg(long, default_value_t = 0)]
    pub discount_bp: u32,
}

pub fn execute(global: &GlobalArgs, args: PaymentTermArgs) -> Result<()> {
    let services = services(global)?;
    let ctx = services.operator_context();

    match args.command {
        PaymentTermCommand::Create(fields) => {
            let id = services.commands.dispatch(
                &CreatePaymentTerm {
                    name: fields.name,
                    days_until_due: fields.days,
                    discount_days: fields.discount_days,
                    discount_basis_points: fields.discount_bp,
                },
                &ctx,
            )?;
            print_json(&json!({ "id": id }))
        }
        PaymentTermCommand::Update { id, fields } => {
            services.commands.dispatch(
                &UpdatePaymentTerm {
                    id: id.clone(),
                    name: fields.name,
                    days_until_due: fields.days,
                    discount_days: fields.discount_days,
                    discount_basis_points: fields.discount_bp,
                },
                &ctx,
            )?;
            let view = services.queries.ask(&GetPaymentTerm { id }, &ctx)?;
            print_json(&view)
        }
        PaymentTermCommand::Delete { id } => {
            services
                .commands
                .dispatch(&DeletePaymentTerm { id: id.clone() }, &ctx)?;
            print_json(&json!({ "id": id, "deleted": true }))
        }
        PaymentTermCommand::Get { id } => {
            let view = services.queries.ask(&GetPaymentTerm { id }, &ctx)?;
            print_json(&view)
        }
        PaymentTermCommand::List(list) => {
            let page = services.queries.ask(
                &ListPaymentTerms {
                    options: list.into(),
                },
                &ctx,
            )?;
            print_json(&page)
        }
    }
}
