mod mock_log_receiver;

pub use mock_log_receiver::MockLogReceiver;
