pub mod mock_sender;

pub use mock_sender::MockSender;
