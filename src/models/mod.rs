mod mock_endpoint;

pub use mock_endpoint::MockEndpoint;
