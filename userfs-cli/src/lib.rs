#[cfg(test)]
mod tests;

mod command;
mod session;

pub use self::{
    command::{Command, ParseError},
    session::Session,
};
