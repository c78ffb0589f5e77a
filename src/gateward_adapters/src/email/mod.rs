mod job_queue_email_client;
mod mock_email_client;

pub use job_queue_email_client::JobQueueEmailClient;
pub use mock_email_client::MockEmailClient;
