use std::ffi::OsString;

use crate::config::DEFAULT_EXAMPLE;
pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Console query panel for an analytics API", long_about = None)]
struct ClapArgs {
    /// Profile name to load from the profile file. Default is 'default'.
    /// A missing profile gives a read-only panel.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(short = 'e', long, default_value = DEFAULT_EXAMPLE, help = "example query to start from")]
    example: String,

    #[clap(short = 's', long, help = "site to select instead of the profile's")]
    site: Option<String>,

    #[clap(short = 'v', long, help = "log at debug level")]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    example: String,
    site: Option<String>,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            example: args.example,
            site: args.site,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
