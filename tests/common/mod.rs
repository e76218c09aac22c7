pub mod fake_device;
pub mod mock_app;
