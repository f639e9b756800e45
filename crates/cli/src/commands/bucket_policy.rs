//! bucket-policy command - Manage the access policy of a bucket
//!
//! Unlike the other bucket configuration documents the policy is JSON, so the
//! payload is parsed locally before it is uploaded.

use ossctl_core::{CommandDescriptor, CommandGroup, ConfigKind, HelpText, Locale};

use super::bucket_config::{BucketConfigCommand, PayloadCheck, BUCKET_CONFIG_OPTIONS};

const ENGLISH: HelpText = HelpText {
    synopsis: "manage the access policy of a bucket",
    param: "bucket_url [local_json_file] [options]",
    syntax: "
ossctl bucket-policy --method put oss://bucket local_json_file [options]
ossctl bucket-policy --method get oss://bucket [local_json_file] [options]
ossctl bucket-policy --method delete oss://bucket [options]
",
    detail: r#"
bucket-policy sets, gets or deletes the access policy of a bucket. The policy
is a JSON document and is rejected before upload if it does not parse:

    {
        "Version": "1",
        "Statement": [
            {
                "Effect": "Allow",
                "Action": ["oss:GetObject"],
                "Principal": ["*"],
                "Resource": ["acs:oss:*:*:bucket/*"]
            }
        ]
    }
"#,
    sample: "
1) ossctl bucket-policy --method put oss://bucket policy.json
2) ossctl policy --method get oss://bucket policy.json
3) ossctl bucket-policy --method delete oss://bucket
",
};

const CHINESE: HelpText = HelpText {
    synopsis: "设置、查询或者删除bucket的授权策略",
    param: "bucket_url [local_json_file] [options]",
    syntax: "",
    detail: "
bucket-policy 命令可以设置、查询或者删除bucket的授权策略。策略是json格式的文件,
上传前会先在本地校验格式。
",
    sample: "",
};

pub static DESCRIPTOR: CommandDescriptor = CommandDescriptor {
    name: "bucket-policy",
    aliases: &["policy"],
    min_args: 1,
    max_args: 2,
    allowed_options: BUCKET_CONFIG_OPTIONS,
    group: CommandGroup::Additional,
    help: &[(Locale::English, ENGLISH), (Locale::Chinese, CHINESE)],
};

pub fn command() -> BucketConfigCommand {
    BucketConfigCommand::new(&DESCRIPTOR, ConfigKind::Policy).with_payload_check(PayloadCheck::Json)
}
