use std::io::{self, BufRead};

use log::{error, info};

use savehook::{config, event::Event, host::PluginHost, manifest::PluginManifest, plugin};

fn main() {
    env_logger::init();
    let conf =
        config::Config::read(config::Config::path()).expect("Could not initialize configuration.");
    let manifest = PluginManifest::read(conf.manifest).expect("Could not read plugin manifest.");
    let markdown_save =
        plugin::markdown_save::MarkdownSave::stdout().with_notice_duration(conf.notice_duration_ms);
    let mut host = PluginHost::default();
    host.register(manifest, Box::new(markdown_save));
    host.load_all();

    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => {
                match Event::try_from(line.as_str()) {
                    Ok(event) => host.dispatch(&event),
                    Err(_) => host.dispatch_raw(&line),
                };
            }
            Err(e) => {
                error!("Could not read event: {}", e);
                break;
            }
        }
    }

    host.unload_all();
    info!("Host shut down");
}
