use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Platform {
  Node,
  Browser,
  Neutral,
}

impl From<Platform> for bunpack::Platform {
  fn from(value: Platform) -> Self {
    match value {
      Platform::Node => bunpack::Platform::Node,
      Platform::Browser => bunpack::Platform::Browser,
      Platform::Neutral => bunpack::Platform::Neutral,
    }
  }
}
