//! The signed-in user's profile.

use tracing::instrument;
use workpro_core::UserProfile;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::MultipartForm;

/// Multipart field the backend reads the picture from.
const PROFILE_PIC_FIELD: &str = "profilePic";

impl ApiClient {
    /// Fetch the current profile and refresh the cached copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the session cannot be written.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self.send_json(self.get("/api/users/me")).await?;
        self.session().set_profile(&profile)?;
        Ok(profile)
    }

    /// Upload a new profile picture.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails or the session cannot be written.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_profile_picture(
        &self,
        file_name: &str,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<UserProfile, ApiError> {
        let form = MultipartForm::new().file(PROFILE_PIC_FIELD, file_name, mime, bytes);
        let profile: UserProfile = self
            .send_json(self.post("/api/users/profile-pic").multipart(form))
            .await?;
        self.session().set_profile(&profile)?;
        Ok(profile)
    }
}
