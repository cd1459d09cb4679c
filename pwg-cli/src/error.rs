use pwg_lib::generator::GeneratorError;

#[derive(Debug)]
pub enum CliError {
    Generator(String),
    Clipboard(String),
    Config(String),
    Output(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return match self {
            Self::Generator(msg) => f.write_str(msg),
            Self::Clipboard(msg) => f.write_fmt(std::format_args!("Clipboard error: {}", msg)),
            Self::Config(msg) => f.write_fmt(std::format_args!("Config error: {}", msg)),
            Self::Output(msg) => f.write_fmt(std::format_args!("Output error: {}", msg)),
        };
    }
}

impl std::error::Error for CliError {}

impl From<GeneratorError> for CliError {
    fn from(value: GeneratorError) -> Self {
        Self::Generator(value.to_string())
    }
}

impl From<arboard::Error> for CliError {
    fn from(value: arboard::Error) -> Self {
        Self::Clipboard(value.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Config(value.to_string())
    }
}
