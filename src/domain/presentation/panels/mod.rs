pub mod diagnostics_panel;
pub mod help_panel;
pub mod journal_panel;
pub mod main_menu_panel;
pub mod settings_panel;
