//! Account group commands

use clap::{Args, Subcommand};
use intraops_core::accounting::{
    CreateAccountGroup, DeleteAccountGroup, GetAccountGroup, ListAccountGroups,
    UpdateAccountGroup,
};
use intraops_core::errors::Result;
use serde_json::json;

use super::{print_json, services, GlobalArgs, ListArgs};

#[derive(Debug, Args)]
pub struct AccountGroupArgs {
    #[command(subcommand)]
    pub command: AccountGroupCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountGroupCommand {
    /// Create an account group
    Create(GroupFields),
    /// Replace the fields of an account group
    Update {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: GroupFields,
    },
    /// Delete an account group
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Show one account group
    Get {
        #[arg(long)]
        id: String,
    },
    /// List account groups by number
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct GroupFields {
    /// Chart-of-accounts number (digits)
    #[arg(long)]
    pub number: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,
}

pub fn execute(global: &GlobalArgs, args: AccountGroupArgs) -> Result<()> {
    let services = services(global)?;
    let ctx = services.operator_context();

    match args.command {
        AccountGroupCommand::Create(fields) => {
            let id = services.commands.dispatch(
                &CreateAccountGroup {
                    number: fields.number,
                    name: fields.name,
                    description: fields.description,
                },
                &ctx,
            )?;
            print_json(&json!({ "id": id }))
        }
        AccountGroupCommand::Update { id, fields } => {
            services.commands.dispatch(
                &UpdateAccountGroup {
                    id: id.clone(),
                    number: fields.number,
                    name: fields.name,
                    description: fields.description,
                },
                &ctx,
            )?;
            let view = services.queries.ask(&GetAccountGroup { id }, &ctx)?;
            print_json(&view)
        }
        AccountGroupCommand::Delete { id } => {
            services
                .commands
                .dispatch(&DeleteAccountGroup { id: id.clone() }, &ctx)?;
            print_json(&json!({ "id": id, "deleted": true }))
        }
        AccountGroupCommand::Get { id } => {
            let view = services.queries.ask(&GetAccountGroup { id }, &ctx)?;
            print_json(&view)
        }
        AccountGroupCommand::List(list) => {
            let page = services.queries.ask(
                &ListAccountGroups {
                    options: list.into(),
                },
                &ctx,
            )?;
            print_json(&page)
        }
    }
}
