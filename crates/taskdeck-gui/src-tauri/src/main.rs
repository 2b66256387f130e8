mod backend;
mod commands;

use std::env;

use tauri::Manager;
use tauri::menu::{Menu, MenuItem};
use tauri::tray::TrayIconBuilder;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::backend::BackendProcess;

fn init_tracing() -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,taskdeck_gui_tauri=debug,taskdeck_core=debug"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily("logs", "taskdeck-gui.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init();

    guard
}

#[cfg(target_os = "linux")]
fn configure_wayland_defaults() {
    let defaults = [
        // Prefer native Wayland backend for GTK/WebKit.
        ("GDK_BACKEND", "wayland"),
        // Keep winit on Wayland to avoid mixed backend behavior.
        ("WINIT_UNIX_BACKEND", "wayland"),
        // Work around compositor/driver dmabuf instability on some
        // systems.
        ("WEBKIT_DISABLE_DMABUF_RENDERER", "1"),
    ];

    for (key, value) in defaults {
        if env::var_os(key).is_none() {
            unsafe {
                env::set_var(key, value);
            }
            info!(key, value, "set linux GUI runtime default");
        } else {
            info!(key, "preserving existing linux GUI runtime value");
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn configure_wayland_defaults() {}

fn main() {
    let _guard = init_tracing();
    configure_wayland_defaults();

    info!("starting Taskdeck shell");

    let config = taskdeck_core::config::load();
    let backend = BackendProcess::new(config.backend);
    if let Err(err) = backend.spawn() {
        // A missing backend is not fatal: the renderer keeps retrying
        // and surfaces the failure to the user.
        error!(error = %err, "backend autostart failed");
    }

    let app = tauri::Builder::default()
        .setup(|app| {
            setup_tray(app)?;
            install_signal_handlers(app.handle().clone());

            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                let backend = handle.state::<BackendProcess>();
                backend.wait_ready().await;
            });
            Ok(())
        })
        .manage(backend)
        .invoke_handler(tauri::generate_handler![
            commands::window_minimize,
            commands::window_toggle_maximize,
            commands::window_close,
            commands::backend_status,
        ])
        .on_window_event(|window, event| {
            // On macOS closing the window hides it to the tray; Quit in
            // the tray menu is the real exit. Elsewhere closing the
            // window exits the app and takes the backend with it.
            #[cfg(target_os = "macos")]
            if let tauri::WindowEvent::CloseRequested { api, .. } = event {
                let _ = window.hide();
                api.prevent_close();
            }
            #[cfg(not(target_os = "macos"))]
            let _ = (window, event);
        })
        .build(tauri::generate_context!())
        .expect("error while building Taskdeck shell");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("shutting down backend process");
            app_handle.state::<BackendProcess>().shutdown();
        }
    });
}

fn setup_tray(app: &tauri::App) -> tauri::Result<()> {
    let show = MenuItem::with_id(app, "show", "Show", true, None::<&str>)?;
    let quit = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&show, &quit])?;

    let mut tray = TrayIconBuilder::new()
        .menu(&menu)
        .tooltip("Taskdeck")
        .on_menu_event(|app, event| match event.id.as_ref() {
            "show" => {
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.show();
                    let _ = window.set_focus();
                }
            }
            "quit" => app.exit(0),
            _ => {}
        });
    if let Some(icon) = app.default_window_icon().cloned() {
        tray = tray.icon(icon);
    }
    tray.build(app)?;
    Ok(())
}

fn install_signal_handlers(app_handle: tauri::AppHandle) {
    tauri::async_runtime::spawn(async move {
        wait_for_shutdown_signal().await;
        warn!("received shutdown signal; exiting application");
        app_handle.exit(0);
    });
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(stream) => stream,
        Err(error) => {
            error!(%error, "failed to register SIGINT handler; falling back to ctrl_c");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(error) => {
            error!(%error, "failed to register SIGTERM handler; falling back to ctrl_c");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed waiting for ctrl_c signal");
    }
}
