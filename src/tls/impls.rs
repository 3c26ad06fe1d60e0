pub mod tls_connection;
pub mod tls_server;
