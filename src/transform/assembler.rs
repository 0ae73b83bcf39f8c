//! Copy engine: assembles DTOs from models and updates models from DTOs.
//!
//! Every call is a self-contained pipeline: resolve parameters, then for each
//! parameter read the source property, apply the transformer, write the
//! target property. The first field failure aborts the whole operation; no
//! partially populated DTO or model escapes. The only state kept between
//! calls is the transformer cache, scoped by [`CacheScope`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::access::PropertyAccess;
use crate::error::{AssembleError, AssembleResult, Direction, ResolveResult};
use crate::schema::DtoSchema;

use super::params::{resolve_transfer_params, TransferParams};
use super::registry::TransformerRegistry;

/// Scope of the transformer instance cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheScope {
    /// One cache for the engine's whole lifetime. Transformer instances are
    /// shared across calls.
    PerEngine,
    /// A fresh cache for every resolution pass. Transformer instances never
    /// outlive the call that constructed them.
    PerCall,
}

/// Options for the assembly engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblerOptions {
    /// How long constructed transformer instances are retained.
    pub cache_scope: CacheScope,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            cache_scope: CacheScope::PerEngine,
        }
    }
}

/// The copy engine.
///
/// Construct one and pass it where assembly is needed; there is no global
/// instance. Models are never mutated by `assemble`/`assemble_all`; the
/// reverse direction mutates the given model in place and never the DTO.
pub struct Assembler {
    options: AssemblerOptions,
    registry: TransformerRegistry,
}

impl Assembler {
    pub fn new() -> Self {
        Self::with_options(AssemblerOptions::default())
    }

    pub fn with_options(options: AssemblerOptions) -> Self {
        Self {
            options,
            registry: TransformerRegistry::new(),
        }
    }

    /// Resolve the transfer parameters for `schema` under this engine's
    /// cache policy.
    pub fn transfer_params(&mut self, schema: &DtoSchema) -> ResolveResult<Vec<TransferParams>> {
        match self.options.cache_scope {
            CacheScope::PerEngine => resolve_transfer_params(schema, &mut self.registry),
            CacheScope::PerCall => {
                resolve_transfer_params(schema, &mut TransformerRegistry::new())
            }
        }
    }

    /// Assemble a new DTO from `model` according to `schema`.
    ///
    /// A null model is rejected before any copying. Every non-ignored field
    /// is populated through its transformer; ignored fields keep the value
    /// the constructor gave them.
    pub fn assemble(&mut self, model: &Value, schema: &DtoSchema) -> AssembleResult<Value> {
        if model.is_null() {
            return Err(AssembleError::InvalidInput { what: "model" });
        }

        let params = self.transfer_params(schema)?;
        let mut dto = schema
            .instantiate()
            .map_err(|source| AssembleError::Instantiation {
                dto: schema.name().to_string(),
                source,
            })?;

        tracing::debug!(dto = schema.name(), fields = params.len(), "assembling dto");
        for param in &params {
            copy_to_dto(model, &mut dto, param)?;
        }

        Ok(dto)
    }

    /// Assemble one DTO per model, preserving input order.
    ///
    /// Sequential and fail-fast: the first element failure aborts the batch
    /// and no partial result is returned. An empty input yields an empty
    /// output.
    pub fn assemble_all(
        &mut self,
        models: &[Value],
        schema: &DtoSchema,
    ) -> AssembleResult<Vec<Value>> {
        let mut dtos = Vec::with_capacity(models.len());
        for model in models {
            dtos.push(self.assemble(model, schema)?);
        }
        Ok(dtos)
    }

    /// Update `model` in place from `dto`: for each parameter, read the DTO
    /// property, apply the transformer's `reverse`, write the model property.
    ///
    /// Same fail-fast error classification as `assemble`, with direction
    /// `dto -> model`. The DTO is never mutated.
    pub fn copy_to_model(
        &self,
        dto: &Value,
        model: &mut Value,
        params: &[TransferParams],
    ) -> AssembleResult<()> {
        if dto.is_null() {
            return Err(AssembleError::InvalidInput { what: "dto" });
        }
        if model.is_null() {
            return Err(AssembleError::InvalidInput { what: "model" });
        }

        for param in params {
            copy_from_dto(dto, model, param)?;
        }
        Ok(())
    }

    /// Convenience over [`Assembler::copy_to_model`]: resolve the parameters
    /// for `schema`, then copy `dto` onto `model`.
    pub fn update_model(
        &mut self,
        dto: &Value,
        model: &mut Value,
        schema: &DtoSchema,
    ) -> AssembleResult<()> {
        let params = self.transfer_params(schema)?;
        self.copy_to_model(dto, model, &params)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

fn copy_to_dto<M, D>(model: &M, dto: &mut D, param: &TransferParams) -> AssembleResult<()>
where
    M: PropertyAccess + ?Sized,
    D: PropertyAccess + ?Sized,
{
    let direction = Direction::ModelToDto;

    let value = model
        .get_property(param.model_property())
        .map_err(|source| AssembleError::PropertyCopy {
            property: param.model_property().to_string(),
            direction,
            source: source.into(),
        })?;

    let transformed =
        param
            .transformer()
            .transform(value)
            .map_err(|source| AssembleError::PropertyCopy {
                property: param.dto_property().to_string(),
                direction,
                source: source.into(),
            })?;

    dto.set_property(param.dto_property(), transformed)
        .map_err(|source| AssembleError::PropertyCopy {
            property: param.dto_property().to_string(),
            direction,
            source: source.into(),
        })
}

fn copy_from_dto<D, M>(dto: &D, model: &mut M, param: &TransferParams) -> AssembleResult<()>
where
    D: PropertyAccess + ?Sized,
    M: PropertyAccess + ?Sized,
{
    let direction = Direction::DtoToModel;

    let value = dto
        .get_property(param.dto_property())
        .map_err(|source| AssembleError::PropertyCopy {
            property: param.dto_property().to_string(),
            direction,
            source: source.into(),
        })?;

    let reversed =
        param
            .transformer()
            .reverse(value)
            .map_err(|source| AssembleError::PropertyCopy {
                property: param.dto_property().to_string(),
                direction,
                source: source.into(),
            })?;

    model
        .set_property(param.model_property(), reversed)
        .map_err(|source| AssembleError::PropertyCopy {
            property: param.model_property().to_string(),
            direction,
            source: source.into(),
        })
}
