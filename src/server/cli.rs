use std::{path::PathBuf, time::Duration};

use super::config::AppConfigPartial;
use crate::game_config::PartialGameConfig;

const VERSION: &str = concat!("puissance-quatre-server, version ", env!("CARGO_PKG_VERSION"));

const HELP: &str = "\
USAGE:
  puissance-quatre-server [OPTIONS]

OPTIONS:
  -b --url-base <URL_BASE>                  Public URL announced at startup
  -p --port <PORT>                          Port to use
  -a --address <ADDRESS>                    Address to use
     --serve-from <DIR>                     Directory served under /static
     --private-key-file <FILE>              Private key file, enables TLS with --cert-chain-file
     --cert-chain-file <FILE>               Certificate chain file
     --robot-delay <SECONDS>                Pause before showing the robot's reply, 0 to disable
  -m --mode <MODE>                          local, robot or evilRobot
     --starting-player <PLAYER>             violet or orange
     --steal-one-in <N>                     Evil robot steals a chip once in N turns
  -c --config <FILE>                        Configuration file. Any command line options override configuration settings.
     --print-config                         Print configuration file and exit
     --version                              Show version and exit
  -h --help                                 Show this message and exit
";

fn parse_secs(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

pub struct AppArgs {
    pub partial_config: AppConfigPartial,
    pub config: Option<PathBuf>,
    pub print_config: bool,
}

impl AppArgs {
    pub fn from_env() -> Result<Self, pico_args::Error> {
        let mut pargs = pico_args::Arguments::from_env();

        if pargs.contains(["-h", "--help"]) {
            print!("{VERSION}\n\n{HELP}");
            std::process::exit(0);
        }

        if pargs.contains(["-v", "--version"]) {
            println!("{VERSION}");
            std::process::exit(0);
        }

        let game = PartialGameConfig {
            mode: pargs.opt_value_from_str(["-m", "--mode"])?,
            starting_player: pargs.opt_value_from_str("--starting-player")?,
            steal_one_in: pargs.opt_value_from_str("--steal-one-in")?,
        };

        let partial_config = AppConfigPartial {
            url_base: pargs.opt_value_from_str(["-b", "--url-base"])?,
            socket: pargs.opt_value_from_str(["-p", "--port"])?,
            address: pargs.opt_value_from_str(["-a", "--address"])?,
            serve_from: pargs.opt_value_from_str("--serve-from")?,
            private_key_file: pargs.opt_value_from_str("--private-key-file")?,
            certificate_chain_file: pargs.opt_value_from_str("--cert-chain-file")?,
            robot_delay: pargs.opt_value_from_fn("--robot-delay", parse_secs)?,
            game,
        };

        let args = Self {
            partial_config,
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            print_config: pargs.contains("--print-config"),
        };

        let extra_args = pargs.finish();
        if !extra_args.is_empty() {
            let plural = if extra_args.len() == 1 { "" } else { "s" };
            let mut arg_list = String::new();

            for arg in extra_args {
                if !arg_list.is_empty() {
                    arg_list.push_str(", ");
                }
                arg_list.push_str(&arg.to_string_lossy());
            }

            eprintln!("Unknown argument{plural}: {arg_list}");
            std::process::exit(1);
        }

        Ok(args)
    }
}
