pub mod login_handler;
