//! Profile commands.

use std::path::Path;

use super::{CliError, Context, action_failed};

/// Upload a profile picture from disk.
pub async fn upload(ctx: &Context, file: &Path) -> Result<(), CliError> {
    let bytes = tokio::fs::read(file).await.map_err(|source| CliError::ReadFile {
        path: file.display().to_string(),
        source,
    })?;
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("profile-picture");

    let profile = ctx
        .client
        .upload_profile_picture(file_name, image_mime(file), bytes)
        .await
        .map_err(action_failed("Could not upload profile picture"))?;

    match &profile.profile_pic {
        Some(url) => tracing::info!("Profile picture updated: {url}"),
        None => tracing::info!("Profile picture updated"),
    }
    Ok(())
}

/// MIME type from the file extension, for the common image formats.
fn image_mime(file: &Path) -> Option<&'static str> {
    let ext = file.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime_from_extension() {
        assert_eq!(image_mime(Path::new("me.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("a/b/me.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("noext")), None);
    }
}
