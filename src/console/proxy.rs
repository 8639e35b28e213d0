use colored::Colorize;

use super::{ask, ask_optional, clear_screen, header, invalid_choice, pause, read_choice, Session};
use crate::platform::OsFamily;
use crate::proxy::{
    windows_proxy_disable_requests, windows_proxy_enable_requests, ProxySettings,
};

const MODULE: &str = "Proxy";

pub fn menu(session: &Session) {
    loop {
        clear_screen();
        header("Proxy Management");
        println!("1. Show Current Proxy Settings");
        println!("2. Set HTTP/HTTPS Proxy (session environment)");
        println!("3. Clear HTTP/HTTPS Proxy (session environment)");
        if session.os == OsFamily::Windows {
            println!("4. Set Windows Internet Settings Proxy");
            println!("5. Disable Windows Internet Settings Proxy");
        }
        println!("0. Back to Main Menu");
        println!();

        let choice = read_choice();
        match choice.as_str() {
            "1" => show(session),
            "2" => set_env(session),
            "3" => clear_env(session),
            "4" if session.os == OsFamily::Windows => set_windows(session),
            "5" if session.os == OsFamily::Windows => disable_windows(session),
            "0" => break,
            _ => invalid_choice(),
        }
        pause();
    }
}

fn show(session: &Session) {
    let current = ProxySettings::current();
    if current.is_empty() {
        println!("No proxy environment variables are set in this session.");
    } else {
        if let Some(http) = &current.http {
            println!("HTTP_PROXY:  {}", http);
        }
        if let Some(https) = &current.https {
            println!("HTTPS_PROXY: {}", https);
        }
        if let Some(no_proxy) = &current.no_proxy {
            println!("NO_PROXY:    {}", no_proxy);
        }
    }
    if session.os == OsFamily::Windows {
        println!("\nPer-user Internet Settings proxy (registry):");
        let query = crate::exec::CommandRequest::new([
            "reg",
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Internet Settings",
            "/v",
            "ProxyServer",
        ]);
        session.run_reported(MODULE, "Show Windows Proxy", &[query]);
    }
    session.audit.record(MODULE, "Show Settings", "displayed");
}

fn set_env(session: &Session) {
    let Some(address) = ask("Proxy address (e.g. http://proxy.example.com:8080):") else {
        return;
    };
    let no_proxy = ask_optional("Hosts to exclude, comma separated (e.g. localhost,127.0.0.1):");

    let settings = ProxySettings::new(Some(address.clone()), Some(address.clone()), no_proxy);
    settings.apply();

    println!("{}", format!("✓ Session proxy set to {}.", address).green());
    println!("This applies to the current session only and is not persistent.");
    session
        .audit
        .record(MODULE, "Set Session Proxy", &format!("proxy={}", address));
}

fn clear_env(session: &Session) {
    ProxySettings::clear();
    println!("{}", "✓ Session proxy variables removed.".green());
    println!("Persistent system or shell-profile proxy settings are untouched.");
    session.audit.record(MODULE, "Clear Session Proxy", "cleared");
}

fn set_windows(session: &Session) {
    let Some(address) = ask("Proxy address (e.g. proxy.example.com:8080):") else {
        return;
    };
    let requests = windows_proxy_enable_requests(&address);
    if session.run_reported(MODULE, "Set Windows Proxy", &requests) {
        println!("{}", "✓ Windows Internet Settings proxy configured.".green());
        println!("Applications may need to be restarted to pick up the change.");
    }
}

fn disable_windows(session: &Session) {
    // The ProxyServer value may be absent already; deleting it is best
    // effort while ProxyEnable=0 is the part that matters.
    let requests = windows_proxy_disable_requests();
    if session.run_tolerant(MODULE, "Disable Windows Proxy", &requests) {
        println!("{}", "✓ Windows Internet Settings proxy disabled.".green());
    }
}
