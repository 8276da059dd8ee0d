use super::{RelationKind, Schema};
use crate::{Error, Result};

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for entity in self.schema.entities() {
            self.verify_field_names_are_unique(entity)?;

            for (field, relation) in entity.relations() {
                if !self.schema.contains(&relation.target) {
                    return Err(Error::invalid_schema(format!(
                        "{}.{} targets unregistered entity `{}`",
                        entity.name, field.name, relation.target
                    )));
                }

                if relation.kind == RelationKind::ManyToMany && relation.join_table.is_none() {
                    return Err(Error::invalid_schema(format!(
                        "{}.{} is many-to-many but declares no join table",
                        entity.name, field.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_field_names_are_unique(&self, entity: &super::Entity) -> Result<()> {
        for (i, field) in entity.fields.iter().enumerate() {
            if entity.fields[..i]
                .iter()
                .any(|prev| prev.name.eq_ignore_ascii_case(&field.name))
            {
                return Err(Error::invalid_schema(format!(
                    "{} declares field `{}` more than once",
                    entity.name, field.name
                )));
            }
        }

        Ok(())
    }
}
