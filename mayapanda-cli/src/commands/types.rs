use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use colored::*;

use mayapanda_core::{registry, SortMode};

use crate::ui::{divider, header};

/// Browse the egg-object-type catalog
#[derive(Args)]
pub struct TypesCommand {
    #[command(subcommand)]
    action: TypesAction,
}

#[derive(Subcommand)]
enum TypesAction {
    /// List all registered type names
    List {
        /// Listing order
        #[arg(long, value_enum, default_value = "category")]
        sort: Sort,
    },

    /// Show one type's description, flags, and PRC definition line
    Show {
        /// Type name, e.g. "floor"
        name: String,
    },

    /// Print the PRC configuration block registering every type
    Prc,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Sort {
    Registration,
    Alphabetical,
    Category,
}

impl From<Sort> for SortMode {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Registration => SortMode::Registration,
            Sort::Alphabetical => SortMode::Alphabetical,
            Sort::Category => SortMode::ByCategory,
        }
    }
}

impl TypesCommand {
    pub fn execute(&self) -> Result<()> {
        match &self.action {
            TypesAction::List { sort } => self.list((*sort).into()),
            TypesAction::Show { name } => self.show(name),
            TypesAction::Prc => {
                print!("{}", registry().prc_block());
                Ok(())
            }
        }
    }

    fn list(&self, sort: SortMode) -> Result<()> {
        let reg = registry();
        header(&format!("Egg Object Types ({})", reg.len()));
        for name in reg.all_names(sort) {
            let ot = reg.lookup(name)?;
            let category = ot.category.info().friendly_name;
            println!(
                "  {:24} {:12} {}",
                name.bright_white(),
                category.cyan(),
                ot.display_name().dimmed()
            );
        }
        Ok(())
    }

    fn show(&self, name: &str) -> Result<()> {
        let ot = registry().lookup(name)?;
        header(&format!("egg-object-type: {}", ot.name));
        println!("  Display name: {}", ot.display_name());
        println!("  Category:     {}", ot.category.info().friendly_name);
        println!("  Color:        {}", ot.effective_color());
        divider();
        println!("{}", ot.annotation_text());
        divider();
        println!("  PRC line: {}", ot.definition_syntax().bright_white());
        Ok(())
    }
}
