//! Option descriptions for the input records shared by every module.

use rexec_common::auth::Credentials;
use rexec_common::network::target::Targets;

use crate::binder::{InputShape, ModuleInput};

impl ModuleInput for Targets {
    fn describe(shape: &mut InputShape<Self>) {
        shape
            .text("host", "Host of the target (e.g., IP, hostname)", |t| &mut t.host)
            .text(
                "host-file",
                "Path to a file that contains multiple hosts",
                |t| &mut t.host_file,
            );
    }
}

impl ModuleInput for Credentials {
    fn describe(shape: &mut InputShape<Self>) {
        shape
            .text("domain", "Domain of the user", |c| &mut c.domain)
            .text("username", "Username to login with", |c| &mut c.username)
            .text("password", "Password to login with", |c| &mut c.password)
            .flag(
                "kerberos",
                "Authenticate with the Kerberos ticket from KRB5CCNAME",
                |c| &mut c.kerberos,
            );
    }
}
