use derive_new::new;

#[derive(Debug, new)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}
