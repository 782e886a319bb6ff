pub type Result<T> = core::result::Result<T, standard_error::StandardError>;
