//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod search_gateway;
mod students_command;
mod students_query;

#[cfg(test)]
pub use search_gateway::MockSearchGateway;
pub use search_gateway::{ClusterInfo, SearchGateway, SearchGatewayError};
#[cfg(test)]
pub use students_command::MockStudentsCommand;
pub use students_command::StudentsCommand;
#[cfg(test)]
pub use students_query::MockStudentsQuery;
pub use students_query::StudentsQuery;
