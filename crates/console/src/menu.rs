//! Interactive menu loop.

use std::io::{BufRead, Write};

use stockkeep_core::DomainError;
use stockkeep_inventory::InventoryStore;
use stockkeep_products::{NewProduct, Product, ProductUpdate};

use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::prompt::Prompter;
use crate::report;

/// Top-level menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Quit,
    Add,
    Update,
    Remove,
    FindByCode,
    SearchText,
    ListAll,
    Summary,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Add,
        MenuChoice::Update,
        MenuChoice::Remove,
        MenuChoice::FindByCode,
        MenuChoice::SearchText,
        MenuChoice::ListAll,
        MenuChoice::Summary,
        MenuChoice::Quit,
    ];

    /// Highest number shown in the menu.
    pub const LAST: i64 = 7;

    pub fn number(self) -> i64 {
        match self {
            MenuChoice::Quit => 0,
            MenuChoice::Add => 1,
            MenuChoice::Update => 2,
            MenuChoice::Remove => 3,
            MenuChoice::FindByCode => 4,
            MenuChoice::SearchText => 5,
            MenuChoice::ListAll => 6,
            MenuChoice::Summary => 7,
        }
    }

    pub fn from_number(n: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.number() == n)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Quit => "Quit",
            MenuChoice::Add => "Add product",
            MenuChoice::Update => "Update product",
            MenuChoice::Remove => "Remove product",
            MenuChoice::FindByCode => "Find by code",
            MenuChoice::SearchText => "Search name/description",
            MenuChoice::ListAll => "List all",
            MenuChoice::Summary => "Summary report",
        }
    }
}

/// Field picked in the update submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Name,
    Description,
    Price,
    Stock,
    IncreaseStock,
    DecreaseStock,
}

impl UpdateField {
    pub const ALL: [UpdateField; 6] = [
        UpdateField::Name,
        UpdateField::Description,
        UpdateField::Price,
        UpdateField::Stock,
        UpdateField::IncreaseStock,
        UpdateField::DecreaseStock,
    ];

    pub fn from_number(n: i64) -> Option<Self> {
        usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            UpdateField::Name => "Name",
            UpdateField::Description => "Description",
            UpdateField::Price => "Price",
            UpdateField::Stock => "Stock",
            UpdateField::IncreaseStock => "Increase stock",
            UpdateField::DecreaseStock => "Decrease stock",
        }
    }
}

/// One interactive session over a fresh, empty store.
pub struct Console<R, W> {
    store: InventoryStore,
    prompter: Prompter<R, W>,
    config: ConsoleConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(config: ConsoleConfig, input: R, output: W) -> Self {
        Self {
            store: InventoryStore::new(),
            prompter: Prompter::new(input, output),
            config,
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Everything written so far (prompts, listings, reports).
    pub fn output(&self) -> &W {
        self.prompter.output()
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run until the user quits or input ends.
    ///
    /// Domain failures are reported and the loop continues; only I/O errors
    /// end the session with an `Err`.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            self.print_menu()?;
            let choice = match self.read_choice() {
                Ok(choice) => choice,
                Err(ConsoleError::InputClosed) => return self.say("Exiting..."),
                Err(e) => return Err(e),
            };
            if choice == MenuChoice::Quit {
                return self.say("Exiting...");
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(ConsoleError::Domain(DomainError::Validation(msg))) => {
                    tracing::debug!(?choice, %msg, "action rejected");
                    self.say(&format!("ERROR: {msg}"))?;
                }
                Err(ConsoleError::Domain(DomainError::ProductNotFound(code))) => {
                    tracing::debug!(?choice, %code, "product not found");
                    self.say(&format!("NOT FOUND: {code}"))?;
                }
                Err(ConsoleError::InputClosed) => return self.say("Exiting..."),
                Err(ConsoleError::Io(e)) => return Err(ConsoleError::Io(e)),
                Err(other) => {
                    tracing::debug!(?choice, error = %other, "action failed");
                    self.say(&format!("Unexpected error: {other}"))?;
                }
            }
        }
    }

    fn read_choice(&mut self) -> Result<MenuChoice, ConsoleError> {
        let number = self.prompter.read_int("Option: ", 0, MenuChoice::LAST)?;
        let choice = MenuChoice::from_number(number).ok_or_else(|| DomainError::validation("invalid option"))?;
        Ok(choice)
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<(), ConsoleError> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::Update => self.update(),
            MenuChoice::Remove => self.remove(),
            MenuChoice::FindByCode => self.find_by_code(),
            MenuChoice::SearchText => self.search_text(),
            MenuChoice::ListAll => self.list_all(),
            MenuChoice::Summary => self.summary(),
            MenuChoice::Quit => Ok(()),
        }
    }

    fn print_menu(&mut self) -> Result<(), ConsoleError> {
        let out = self.prompter.output_mut();
        writeln!(out, "--- INVENTORY MENU ---")?;
        for choice in MenuChoice::ALL {
            writeln!(out, "{}) {}.", choice.number(), choice.label())?;
        }
        Ok(())
    }

    fn say(&mut self, line: &str) -> Result<(), ConsoleError> {
        writeln!(self.prompter.output_mut(), "{line}")?;
        Ok(())
    }

    fn add(&mut self) -> Result<(), ConsoleError> {
        self.say("\n--- Add product ---")?;
        let code = self.prompter.read_text("Code: ", true)?;
        let name = self.prompter.read_text("Name: ", true)?;
        let description = self.prompter.read_text("Description (optional): ", false)?;
        let price = self.prompter.read_money("Price: ")?;
        let stock = self.prompter.read_int("Stock: ", 0, i64::MAX)?;

        let product = Product::create(
            NewProduct::new(code, name)
                .description(description)
                .price(price)
                .stock(stock),
        )?;
        self.store.add(product)?;
        self.say("Product added.\n")
    }

    fn update(&mut self) -> Result<(), ConsoleError> {
        self.say("\n--- Update product ---")?;
        let code = self.prompter.read_text("Code to update: ", true)?;
        let Some(product) = self.store.find_by_code(&code) else {
            return self.say("No such product.\n");
        };

        self.say(&format!("Updating: {product}"))?;
        let menu = UpdateField::ALL
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}) {}", i + 1, f.label()))
            .collect::<Vec<_>>()
            .join("  ");
        self.say(&menu)?;

        let number = self
            .prompter
            .read_int("Select field: ", 1, UpdateField::ALL.len() as i64)?;
        let field = UpdateField::from_number(number)
            .ok_or_else(|| DomainError::validation("invalid field"))?;

        let update = match field {
            UpdateField::Name => ProductUpdate::Name(self.prompter.read_text("New name: ", true)?),
            UpdateField::Description => {
                ProductUpdate::Description(self.prompter.read_text("New description: ", false)?)
            }
            UpdateField::Price => ProductUpdate::Price(self.prompter.read_money("New price: ")?),
            UpdateField::Stock => ProductUpdate::Stock(self.prompter.read_int("New stock: ", 0, i64::MAX)?),
            UpdateField::IncreaseStock => {
                ProductUpdate::IncreaseStock(self.prompter.read_int("Amount to add: ", 1, i64::MAX)?)
            }
            UpdateField::DecreaseStock => {
                ProductUpdate::DecreaseStock(self.prompter.read_int("Amount to remove: ", 1, i64::MAX)?)
            }
        };

        self.store.apply_update(&code, update)?;
        self.say("Product updated.\n")
    }

    fn remove(&mut self) -> Result<(), ConsoleError> {
        self.say("\n--- Remove product ---")?;
        let code = self.prompter.read_text("Code to remove: ", true)?;
        if self.store.remove(&code)? {
            self.say("Removed.\n")
        } else {
            self.say("No product with that code.\n")
        }
    }

    fn find_by_code(&mut self) -> Result<(), ConsoleError> {
        self.say("\n--- Find by code ---")?;
        let code = self.prompter.read_text("Code: ", true)?;
        match self.store.find_by_code(&code) {
            Some(product) => self.say(&product.detailed_description())?,
            None => self.say("Not found.")?,
        }
        self.say("")
    }

    fn search_text(&mut self) -> Result<(), ConsoleError> {
        self.say("\n--- Search name/description ---")?;
        let query = self.prompter.read_text("Text: ", true)?;
        let results = self.store.find_by_text(&query);
        self.print_products(&results, "No results.")
    }

    fn list_all(&mut self) -> Result<(), ConsoleError> {
        self.say("\n--- Listing ---")?;
        let products = self.store.list_all();
        self.print_products(&products, "Inventory is empty.")
    }

    fn summary(&mut self) -> Result<(), ConsoleError> {
        self.say("\n--- Summary ---")?;
        let top_n = self
            .prompter
            .read_int("Top by stock (N): ", 1, self.config.max_top_n)?;
        let threshold = self.prompter.read_int("Low stock threshold: ", 0, i64::MAX)?;

        let summary = self.store.generate_summary(top_n, threshold);
        report::render(
            &summary,
            self.config.report_format,
            &self.config.money,
            self.prompter.output_mut(),
        )
    }

    fn print_products(&mut self, products: &[Product], empty: &str) -> Result<(), ConsoleError> {
        if products.is_empty() {
            self.say(empty)?;
        }
        for product in products {
            self.say(&product.to_string())?;
        }
        self.say("")
    }
}
