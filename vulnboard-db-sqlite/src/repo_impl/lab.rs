use super::*;

impl<'a> LabProbeRepository for DbReadWrite<'a> {
    fn probe_user_lookup(&self, name: &str) -> Result<usize> {
        probe_user_lookup(&mut self.conn.borrow_mut(), name)
    }
}

impl<'a> LabProbeRepository for DbReadOnly<'a> {
    fn probe_user_lookup(&self, name: &str) -> Result<usize> {
        probe_user_lookup(&mut self.conn.borrow_mut(), name)
    }
}

// Concatenated on purpose, see `LabProbeRepository`.
fn probe_user_lookup(conn: &mut SqliteConnection, name: &str) -> Result<usize> {
    let query = format!("SELECT * FROM usuarios WHERE usuario = '{name}'");
    diesel::sql_query(query)
        .execute(conn)
        .map_err(from_diesel_err)
}
