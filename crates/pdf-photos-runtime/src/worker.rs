use pdf_photos::{PhotoDocument, PhotoPdfOptions, ResourceTracker, Result, SourceImage};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::session::{PhotoSession, PreviewRequest};
use crate::{ImageSummary, PhotoCommand, PhotoUpdate};

type PreviewRun = Result<Option<PhotoDocument>>;

/// Requested output path plus the written path and page count
type DownloadRun = (PathBuf, Result<Option<(PathBuf, usize)>>);

/// Generation runs spawned off the command loop
#[derive(Default)]
struct Runs {
    previews: JoinSet<PreviewRun>,
    downloads: JoinSet<DownloadRun>,
}

/// Async worker task that owns the photo session, processes commands and
/// sends updates.
///
/// Generation runs execute as separate tasks on snapshots, so commands keep
/// being served while a run is in flight. Once the command channel closes,
/// runs still in flight are awaited and reported before the task returns.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PhotoCommand>,
    update_tx: mpsc::UnboundedSender<PhotoUpdate>,
    options: PhotoPdfOptions,
) {
    let mut session = PhotoSession::new(options);
    let mut runs = Runs::default();

    loop {
        tokio::select! {
            cmd = command_rx.recv() => match cmd {
                Some(cmd) => process_command(cmd, &mut session, &mut runs, &update_tx).await,
                None => break,
            },
            Some(joined) = runs.previews.join_next(), if !runs.previews.is_empty() => {
                handle_preview(joined, &mut session, &update_tx);
            }
            Some(joined) = runs.downloads.join_next(), if !runs.downloads.is_empty() => {
                handle_download(joined, &update_tx);
            }
        }
    }

    while let Some(joined) = runs.previews.join_next().await {
        handle_preview(joined, &mut session, &update_tx);
    }
    while let Some(joined) = runs.downloads.join_next().await {
        handle_download(joined, &update_tx);
    }
    log::debug!("Photo worker stopped");
}

async fn process_command(
    cmd: PhotoCommand,
    session: &mut PhotoSession,
    runs: &mut Runs,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    match cmd {
        PhotoCommand::AddFiles { paths } => match pdf_photos::load_images(&paths).await {
            Ok(images) => {
                session.store_mut().extend(images);
                send_images(session, update_tx);
            }
            Err(e) => send_error(update_tx, format!("Failed to load images: {}", e)),
        },
        PhotoCommand::AddImage { name, bytes } => {
            session.store_mut().add(name, bytes);
            send_images(session, update_tx);
        }
        PhotoCommand::Remove { id } => {
            if session.store_mut().remove(id).is_some() {
                send_images(session, update_tx);
            } else {
                send_error(update_tx, format!("No image with id {}", id.0));
            }
        }
        PhotoCommand::MoveUp { index } => {
            if session.store_mut().move_up(index) {
                send_images(session, update_tx);
            }
        }
        PhotoCommand::MoveDown { index } => {
            if session.store_mut().move_down(index) {
                send_images(session, update_tx);
            }
        }
        PhotoCommand::MoveTo { from, to } => {
            if session.store_mut().move_to(from, to) {
                send_images(session, update_tx);
            } else {
                send_error(
                    update_tx,
                    format!(
                        "Cannot move image {} to {}: only {} image(s)",
                        from,
                        to,
                        session.store().len()
                    ),
                );
            }
        }
        PhotoCommand::ClearAll => {
            session.store_mut().clear();
            send_images(session, update_tx);
        }
        PhotoCommand::Preview => match session.request_preview() {
            PreviewRequest::Started(snapshot) => {
                let _ = update_tx.send(PhotoUpdate::PreviewStarted);
                let options = session.options().clone();
                let tracker = session.tracker().clone();
                runs.previews.spawn(async move {
                    pdf_photos::assemble_document_tracked(&snapshot, &options, &tracker).await
                });
            }
            PreviewRequest::AlreadyGenerating => {
                let _ = update_tx.send(PhotoUpdate::PreviewBusy);
            }
            PreviewRequest::NothingToDo => {
                let _ = update_tx.send(PhotoUpdate::NothingToDo);
            }
        },
        PhotoCommand::Download { output_path } => {
            let snapshot = session.snapshot();
            if snapshot.is_empty() {
                let _ = update_tx.send(PhotoUpdate::NothingToDo);
                return;
            }
            let options = session.options().clone();
            let tracker = session.tracker().clone();
            runs.downloads.spawn(async move {
                let result = download(&snapshot, &options, &tracker, &output_path).await;
                (output_path, result)
            });
        }
        PhotoCommand::ClosePreview => {
            if session.close_preview() {
                let _ = update_tx.send(PhotoUpdate::PreviewClosed);
            }
        }
        PhotoCommand::SetOptions { options } => match options.validate() {
            Ok(()) => {
                session.set_options(options.clone());
                let _ = update_tx.send(PhotoUpdate::OptionsChanged { options });
            }
            Err(e) => send_error(update_tx, format!("Invalid options: {}", e)),
        },
    }
}

/// Assemble a fresh document and write it to `output_path`
async fn download(
    snapshot: &[SourceImage],
    options: &PhotoPdfOptions,
    tracker: &ResourceTracker,
    output_path: &Path,
) -> Result<Option<(PathBuf, usize)>> {
    let Some(doc) = pdf_photos::assemble_document_tracked(snapshot, options, tracker).await? else {
        return Ok(None);
    };

    let is_dir = tokio::fs::metadata(output_path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    let path = if is_dir {
        doc.download(options.file_name.as_str())
            .save_to_dir(output_path)
            .await?
    } else {
        pdf_photos::save_pdf(&doc, output_path).await?;
        output_path.to_path_buf()
    };
    Ok(Some((path, doc.page_count())))
}

fn handle_preview(
    joined: std::result::Result<PreviewRun, tokio::task::JoinError>,
    session: &mut PhotoSession,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    // A run task that died still has to move the session out of Generating
    let result = joined.unwrap_or_else(|e| Err(e.into()));
    match session.finish_preview(result) {
        Ok(Some(preview)) => {
            let _ = update_tx.send(PhotoUpdate::PreviewReady {
                page_count: preview.page_count(),
                byte_len: preview.bytes().len(),
            });
        }
        Ok(None) => {
            let _ = update_tx.send(PhotoUpdate::NothingToDo);
        }
        Err(e) => send_error(update_tx, format!("Failed to generate preview: {}", e)),
    }
}

fn handle_download(
    joined: std::result::Result<DownloadRun, tokio::task::JoinError>,
    update_tx: &mpsc::UnboundedSender<PhotoUpdate>,
) {
    match joined {
        Ok((_, Ok(Some((path, page_count))))) => {
            let _ = update_tx.send(PhotoUpdate::DownloadComplete { path, page_count });
        }
        Ok((_, Ok(None))) => {
            let _ = update_tx.send(PhotoUpdate::NothingToDo);
        }
        Ok((output_path, Err(e))) => send_error(
            update_tx,
            format!("Failed to write {}: {}", output_path.display(), e),
        ),
        Err(e) => send_error(update_tx, format!("Download task failed: {}", e)),
    }
}

fn send_images(session: &PhotoSession, update_tx: &mpsc::UnboundedSender<PhotoUpdate>) {
    let images = session.store().iter().map(ImageSummary::from).collect();
    let _ = update_tx.send(PhotoUpdate::ImagesChanged { images });
}

fn send_error(update_tx: &mpsc::UnboundedSender<PhotoUpdate>, message: String) {
    log::error!("{}", message);
    let _ = update_tx.send(PhotoUpdate::Error { message });
}
