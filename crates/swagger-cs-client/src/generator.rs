use std::collections::HashSet;

use log::{debug, warn};
use swagger_cs_core::config::GeneratorConfig;
use swagger_cs_core::ir::IrSpec;
use swagger_cs_core::{CodeGenerator, GeneratedFile};

use crate::emitters;
use crate::emitters::base_client::BASE_CLIENT_FILE;
use crate::error::EmitError;

/// C# client and model generator.
pub struct CSharpClientGenerator;

impl CodeGenerator for CSharpClientGenerator {
    type Config = GeneratorConfig;
    type Error = EmitError;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &GeneratorConfig,
    ) -> Result<Vec<GeneratedFile>, EmitError> {
        let mut files = vec![GeneratedFile {
            path: format!("{}.cs", ir.info.client_class_name),
            content: emitters::client::emit_client(ir)?,
        }];

        if config.base_client {
            files.push(GeneratedFile {
                path: BASE_CLIENT_FILE.to_string(),
                content: emitters::base_client::emit_base_client(),
            });
        }

        files.extend(emitters::models::emit_models(ir)?);

        // A model named like the client or the base class would overwrite it.
        let mut seen = HashSet::new();
        files.retain(|file| {
            let fresh = seen.insert(file.path.clone());
            if !fresh {
                warn!("skipping {}: file name already generated", file.path);
            }
            fresh
        });

        debug!("generated {} files for {}", files.len(), ir.info.title);
        Ok(files)
    }
}
