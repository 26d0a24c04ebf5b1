use shared::error::AppResult;

// bcrypt is CPU-bound, so both directions run on the blocking pool.

pub(crate) async fn hash(password: &str) -> AppResult<String> {
    let password = password.to_owned();
    let hashed =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST)).await??;
    Ok(hashed)
}

pub(crate) async fn verify(password: &str, hash: String) -> AppResult<bool> {
    let password = password.to_owned();
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matched)
}
